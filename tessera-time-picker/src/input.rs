//! Segmented text input model: fields, meridiem and the display projection.
//!
//! ## Usage
//!
//! Render [`InputProps`] with a segmented input and translate its edits into
//! [`TimePickerEvent`](crate::TimePickerEvent)s.

use std::fmt;

use chrono::{NaiveTime, Timelike};

use crate::{format::TimeFormat, picker::Size};

/// Time-of-day fields editable from the input and the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    /// Hour of day, 0-23.
    Hour,
    /// Minute of hour, 0-59.
    Minute,
    /// Second of minute, 0-59.
    Second,
}

impl TimeField {
    /// All fields in display order.
    pub const ALL: [TimeField; 3] = [TimeField::Hour, TimeField::Minute, TimeField::Second];

    /// Largest value the field accepts.
    pub fn max(self) -> u32 {
        match self {
            TimeField::Hour => 23,
            TimeField::Minute | TimeField::Second => 59,
        }
    }

    /// Reads this field from `time`.
    pub fn get(self, time: NaiveTime) -> u32 {
        match self {
            TimeField::Hour => time.hour(),
            TimeField::Minute => time.minute(),
            TimeField::Second => time.second(),
        }
    }

    /// Returns `time` with this field replaced, clamped to the field range.
    pub fn apply(self, time: NaiveTime, value: u32) -> NaiveTime {
        let value = value.min(self.max());
        let updated = match self {
            TimeField::Hour => time.with_hour(value),
            TimeField::Minute => time.with_minute(value),
            TimeField::Second => time.with_second(value),
        };
        updated.unwrap_or(time)
    }
}

/// Indicates whether a time is before or after noon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Meridiem {
    /// Ante meridiem (before noon).
    #[default]
    Am,
    /// Post meridiem (noon and after).
    Pm,
}

impl Meridiem {
    /// Meridiem of a 24-hour clock hour.
    pub fn from_hour(hour: u32) -> Self {
        if hour >= 12 { Meridiem::Pm } else { Meridiem::Am }
    }

    /// Lowercase label, `"am"` or `"pm"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }

    /// The opposite half of the day.
    pub fn toggled(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    /// Moves `time` into this half of the day, keeping minute and second.
    pub fn apply(self, time: NaiveTime) -> NaiveTime {
        let hour = time.hour();
        let shifted = match (Meridiem::from_hour(hour), self) {
            (Meridiem::Am, Meridiem::Pm) => hour + 12,
            (Meridiem::Pm, Meridiem::Am) => hour - 12,
            _ => hour,
        };
        TimeField::Hour.apply(time, shifted)
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text shown in one input segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentValue {
    /// Bare number, used when the format has the one-character token.
    Number(u32),
    /// Literal text: zero-padded digits or the blur default.
    Text(String),
}

impl SegmentValue {
    /// Numeric value of the segment, if it holds digits.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            SegmentValue::Number(value) => Some(*value),
            SegmentValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for SegmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentValue::Number(value) => write!(f, "{value}"),
            SegmentValue::Text(text) => f.write_str(text),
        }
    }
}

/// Display projection of the selected time.
///
/// Segments are `None` when blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputTime {
    /// Hour segment.
    pub hour: Option<SegmentValue>,
    /// Minute segment.
    pub minute: Option<SegmentValue>,
    /// Second segment.
    pub second: Option<SegmentValue>,
    /// Meridiem toggle.
    pub meridiem: Meridiem,
}

impl InputTime {
    /// Blank projection; the meridiem falls back to am.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Reads one segment.
    pub fn segment(&self, field: TimeField) -> Option<&SegmentValue> {
        match field {
            TimeField::Hour => self.hour.as_ref(),
            TimeField::Minute => self.minute.as_ref(),
            TimeField::Second => self.second.as_ref(),
        }
    }

    /// Mutable access to one segment.
    pub fn segment_mut(&mut self, field: TimeField) -> &mut Option<SegmentValue> {
        match field {
            TimeField::Hour => &mut self.hour,
            TimeField::Minute => &mut self.minute,
            TimeField::Second => &mut self.second,
        }
    }

    /// Whether no segment is filled.
    pub fn is_blank(&self) -> bool {
        TimeField::ALL.iter().all(|field| self.segment(*field).is_none())
    }

    /// Whether every segment is filled.
    pub fn is_complete(&self) -> bool {
        TimeField::ALL.iter().all(|field| self.segment(*field).is_some())
    }
}

/// A single segment edit coming from the text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEdit {
    /// The user emptied the segment.
    Erase,
    /// The user typed a value.
    Value(u32),
}

impl SegmentEdit {
    /// Sentinel used by segmented inputs to signal an erased segment.
    pub const ERASE_SENTINEL: i32 = -1;

    /// Converts a raw input value, mapping the `-1` sentinel to [`Erase`].
    ///
    /// Other negative values are not valid edits.
    ///
    /// [`Erase`]: SegmentEdit::Erase
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            Self::ERASE_SENTINEL => Some(SegmentEdit::Erase),
            value => u32::try_from(value).ok().map(SegmentEdit::Value),
        }
    }
}

impl From<u32> for SegmentEdit {
    fn from(value: u32) -> Self {
        SegmentEdit::Value(value)
    }
}

/// Props handed to the segmented text input collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct InputProps {
    /// Component size.
    pub size: Size,
    /// Current projection to display.
    pub value: InputTime,
    /// Pattern deciding which segments are shown.
    pub format: TimeFormat,
    /// Whether typing into segments is allowed.
    pub allow_input: bool,
    /// Placeholder shown while blank.
    pub placeholder: Option<String>,
    /// Whether the input is disabled.
    pub disabled: bool,
    /// Whether the panel is open, used for the active style.
    pub active: bool,
}
