//! Display patterns for the time picker.
//!
//! ## Usage
//!
//! Patterns use dayjs-style tokens: `H`/`HH` (24-hour), `h`/`hh` (12-hour),
//! `m`/`mm`, `s`/`ss`, `A`/`a` for the meridiem. Text inside `[...]` and any
//! other character is copied literally.

use std::fmt;

use chrono::{
    NaiveTime, Timelike,
    format::{self, Fixed, Item, Numeric, Pad, ParseResult, Parsed},
};
use tracing::trace;

use crate::{
    error::TimeParseError,
    input::{InputTime, Meridiem, SegmentValue, TimeField},
};

/// Pattern used when none is configured.
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Hour { twelve: bool, padded: bool },
    Minute { padded: bool },
    Second { padded: bool },
    Meridiem { upper: bool },
    Literal(String),
}

/// A parsed display pattern.
///
/// The token set decides how the selected time is projected into input
/// segments: 12-hour tokens fold the hour, two-character tokens pad.
#[derive(Clone)]
pub struct TimeFormat {
    pattern: String,
    tokens: Vec<Token>,
}

impl TimeFormat {
    /// Parses `pattern` into tokens.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let tokens = tokenize(&pattern);
        trace!(%pattern, tokens = tokens.len(), "time format tokenized");
        Self { pattern, tokens }
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the hour is shown on a 12-hour clock.
    pub fn is_12_hour(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Hour { twelve: true, .. }))
    }

    /// Whether the pattern shows a meridiem token.
    pub fn has_meridiem(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Meridiem { .. }))
    }

    /// Whether the pattern contains a token for `field`.
    pub fn shows(&self, field: TimeField) -> bool {
        self.tokens
            .iter()
            .any(|token| token_field(token).is_some_and(|(f, _)| f == field))
    }

    /// Whether `field` is zero-padded to two characters.
    pub fn pads(&self, field: TimeField) -> bool {
        self.tokens
            .iter()
            .filter_map(token_field)
            .any(|(f, padded)| f == field && padded)
    }

    /// Projects a time into input segments.
    ///
    /// An absent time yields blank segments with the meridiem set to am.
    pub fn project(&self, value: Option<NaiveTime>) -> InputTime {
        let Some(value) = value else {
            return InputTime::blank();
        };
        let mut hour = value.hour();
        if self.is_12_hour() {
            hour %= 12;
        }
        InputTime {
            hour: Some(self.segment(TimeField::Hour, hour)),
            minute: Some(self.segment(TimeField::Minute, value.minute())),
            second: Some(self.segment(TimeField::Second, value.second())),
            meridiem: Meridiem::from_hour(value.hour()),
        }
    }

    /// Reads a projection back into a time.
    ///
    /// Returns `None` when a segment is blank or not numeric.
    pub fn read_back(&self, input: &InputTime) -> Option<NaiveTime> {
        let mut hour = input.hour.as_ref()?.as_number()?;
        let minute = input.minute.as_ref()?.as_number()?;
        let second = input.second.as_ref()?.as_number()?;
        if self.is_12_hour() {
            hour %= 12;
            if input.meridiem == Meridiem::Pm {
                hour += 12;
            }
        }
        NaiveTime::from_hms_opt(hour, minute, second)
    }

    /// Parses `input` with this pattern.
    ///
    /// Missing minute or second fields default to zero, and a 12-hour hour
    /// without a meridiem is read as am.
    pub fn parse(&self, input: &str) -> Result<NaiveTime, TimeParseError> {
        if !TimeField::ALL.iter().any(|field| self.shows(*field)) {
            return Err(TimeParseError::NoTimeFields(self.pattern.clone()));
        }
        let items: Vec<Item<'_>> = self.tokens.iter().map(token_item).collect();
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, input.trim(), items.iter())
            .and_then(|()| complete(&mut parsed))
            .map_err(|source| TimeParseError::Mismatch {
                input: input.to_owned(),
                pattern: self.pattern.clone(),
                source,
            })
    }

    /// Writes `value` out with this pattern.
    pub fn render(&self, value: NaiveTime) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        for token in &self.tokens {
            match token {
                Token::Hour { twelve, padded } => {
                    let hour = if *twelve {
                        match value.hour() % 12 {
                            0 => 12,
                            hour => hour,
                        }
                    } else {
                        value.hour()
                    };
                    push_number(&mut out, hour, *padded);
                }
                Token::Minute { padded } => push_number(&mut out, value.minute(), *padded),
                Token::Second { padded } => push_number(&mut out, value.second(), *padded),
                Token::Meridiem { upper } => {
                    let label = Meridiem::from_hour(value.hour()).as_str();
                    if *upper {
                        out.push_str(&label.to_uppercase());
                    } else {
                        out.push_str(label);
                    }
                }
                Token::Literal(text) => out.push_str(text),
            }
        }
        out
    }

    fn segment(&self, field: TimeField, value: u32) -> SegmentValue {
        if self.pads(field) {
            SegmentValue::Text(format!("{value:02}"))
        } else {
            SegmentValue::Number(value)
        }
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

impl PartialEq for TimeFormat {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for TimeFormat {}

impl fmt::Debug for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimeFormat").field(&self.pattern).finish()
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl From<&str> for TimeFormat {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for TimeFormat {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        let token = match c {
            '[' => {
                // An unterminated escape runs to the end of the pattern.
                literal.extend(chars.by_ref().take_while(|c| *c != ']'));
                continue;
            }
            'H' | 'h' | 'm' | 's' => {
                let padded = chars.next_if_eq(&c).is_some();
                match c {
                    'H' => Token::Hour {
                        twelve: false,
                        padded,
                    },
                    'h' => Token::Hour {
                        twelve: true,
                        padded,
                    },
                    'm' => Token::Minute { padded },
                    _ => Token::Second { padded },
                }
            }
            'A' => Token::Meridiem { upper: true },
            'a' => Token::Meridiem { upper: false },
            other => {
                literal.push(other);
                continue;
            }
        };
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(token);
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

fn token_field(token: &Token) -> Option<(TimeField, bool)> {
    match token {
        Token::Hour { padded, .. } => Some((TimeField::Hour, *padded)),
        Token::Minute { padded } => Some((TimeField::Minute, *padded)),
        Token::Second { padded } => Some((TimeField::Second, *padded)),
        Token::Meridiem { .. } | Token::Literal(_) => None,
    }
}

fn token_item(token: &Token) -> Item<'_> {
    match token {
        Token::Hour { twelve: false, .. } => Item::Numeric(Numeric::Hour, Pad::Zero),
        Token::Hour { twelve: true, .. } => Item::Numeric(Numeric::Hour12, Pad::Zero),
        Token::Minute { .. } => Item::Numeric(Numeric::Minute, Pad::Zero),
        Token::Second { .. } => Item::Numeric(Numeric::Second, Pad::Zero),
        Token::Meridiem { upper: true } => Item::Fixed(Fixed::UpperAmPm),
        Token::Meridiem { upper: false } => Item::Fixed(Fixed::LowerAmPm),
        Token::Literal(text) => Item::Literal(text.as_str()),
    }
}

fn complete(parsed: &mut Parsed) -> ParseResult<NaiveTime> {
    if parsed.hour_mod_12().is_none() {
        // 12 is stored as 0 on the 12-hour clock.
        parsed.set_hour12(12)?;
    }
    if parsed.hour_div_12().is_none() {
        parsed.set_ampm(false)?;
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    parsed.to_naive_time()
}

fn push_number(out: &mut String, value: u32, padded: bool) {
    if padded {
        out.push_str(&format!("{value:02}"));
    } else {
        out.push_str(&value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).expect("valid time")
    }

    fn text(value: &str) -> Option<SegmentValue> {
        Some(SegmentValue::Text(value.to_owned()))
    }

    fn number(value: u32) -> Option<SegmentValue> {
        Some(SegmentValue::Number(value))
    }

    #[test]
    fn padding_follows_two_character_tokens() {
        let value = Some(time(5, 7, 9));

        let padded = TimeFormat::new("HH:mm:ss").project(value);
        assert_eq!(padded.hour, text("05"));
        assert_eq!(padded.minute, text("07"));
        assert_eq!(padded.second, text("09"));

        let bare = TimeFormat::new("H:m:s").project(value);
        assert_eq!(bare.hour, number(5));
        assert_eq!(bare.minute, number(7));
        assert_eq!(bare.second, number(9));

        let mixed = TimeFormat::new("H:mm").project(value);
        assert_eq!(mixed.hour, number(5));
        assert_eq!(mixed.minute, text("07"));
        assert_eq!(mixed.second, number(9));
    }

    #[test]
    fn twelve_hour_tokens_fold_the_hour() {
        let format = TimeFormat::new("hh:mm A");
        assert!(format.is_12_hour());
        assert!(format.has_meridiem());

        let evening = format.project(Some(time(21, 5, 0)));
        assert_eq!(evening.hour, text("09"));
        assert_eq!(evening.meridiem, Meridiem::Pm);

        let noon = format.project(Some(time(12, 0, 0)));
        assert_eq!(noon.hour, text("00"));
        assert_eq!(noon.meridiem, Meridiem::Pm);
    }

    #[test]
    fn meridiem_is_reported_for_24_hour_formats() {
        let projection = TimeFormat::new("HH:mm").project(Some(time(18, 0, 0)));
        assert_eq!(projection.hour, text("18"));
        assert_eq!(projection.meridiem, Meridiem::Pm);
    }

    #[test]
    fn absent_value_projects_blank() {
        let projection = TimeFormat::default().project(None);
        assert!(projection.is_blank());
        assert_eq!(projection.meridiem, Meridiem::Am);
    }

    #[test]
    fn escaped_text_is_literal() {
        let format = TimeFormat::new("[at] HH[h]mm");
        assert!(!format.shows(TimeField::Second));
        assert_eq!(format.render(time(8, 30, 0)), "at 08h30");
        assert_eq!(format.parse("at 08h30").ok(), Some(time(8, 30, 0)));
    }

    #[test]
    fn parse_reads_supported_patterns() {
        assert_eq!(
            TimeFormat::new("HH:mm:ss").parse("13:04:05").ok(),
            Some(time(13, 4, 5))
        );
        assert_eq!(
            TimeFormat::new("H:m").parse("7:3").ok(),
            Some(time(7, 3, 0))
        );
        assert_eq!(
            TimeFormat::new("hh:mm a").parse("09:15 pm").ok(),
            Some(time(21, 15, 0))
        );
        assert_eq!(
            TimeFormat::new("h:mm").parse("9:15").ok(),
            Some(time(9, 15, 0))
        );
    }

    #[test]
    fn parse_rejects_mismatched_input() {
        let format = TimeFormat::default();
        assert!(matches!(
            format.parse("noon"),
            Err(TimeParseError::Mismatch { .. })
        ));
        assert!(matches!(
            format.parse("25:00:00"),
            Err(TimeParseError::Mismatch { .. })
        ));
        assert!(matches!(
            TimeFormat::new("[time]").parse("time"),
            Err(TimeParseError::NoTimeFields(_))
        ));
    }

    #[test]
    fn projection_reads_back_to_the_same_time() {
        let samples = [time(0, 0, 0), time(9, 5, 7), time(12, 30, 0), time(23, 59, 59)];
        for pattern in ["HH:mm:ss", "H:m:s", "hh:mm:ss a", "h:m:s A"] {
            let format = TimeFormat::new(pattern);
            for value in samples {
                let projection = format.project(Some(value));
                assert_eq!(format.read_back(&projection), Some(value), "{pattern}");
            }
        }
    }

    #[test]
    fn render_uses_twelve_for_midnight_on_12_hour_clock() {
        let format = TimeFormat::new("h:mm A");
        assert_eq!(format.render(time(0, 5, 0)), "12:05 AM");
        assert_eq!(format.render(time(15, 45, 0)), "3:45 PM");
    }
}
