//! Contract with the dropdown selection panel.
//!
//! ## Usage
//!
//! Render [`PanelProps`] with a column picker and report selections back as
//! [`TimePick`] events.

use chrono::NaiveTime;
use smallvec::SmallVec;

use crate::{
    callback::DisableTime,
    format::TimeFormat,
    input::{Meridiem, TimeField},
};

/// Labels the panel may use for the morning half of the day.
pub const AM_LABELS: &[&str] = &["am", "AM", "上午"];

/// Labels the panel may use for the afternoon half of the day.
pub const PM_LABELS: &[&str] = &["pm", "PM", "下午"];

/// Maps a panel meridiem label to a [`Meridiem`].
pub fn meridiem_for_label(label: &str) -> Option<Meridiem> {
    if AM_LABELS.contains(&label) {
        Some(Meridiem::Am)
    } else if PM_LABELS.contains(&label) {
        Some(Meridiem::Pm)
    } else {
        None
    }
}

/// Columns shown by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerColumn {
    /// Hour column.
    Hour,
    /// Minute column.
    Minute,
    /// Second column.
    Second,
    /// Am/pm column.
    Meridiem,
}

impl PickerColumn {
    /// The time field edited by this column, `None` for the meridiem.
    pub fn field(self) -> Option<TimeField> {
        match self {
            PickerColumn::Hour => Some(TimeField::Hour),
            PickerColumn::Minute => Some(TimeField::Minute),
            PickerColumn::Second => Some(TimeField::Second),
            PickerColumn::Meridiem => None,
        }
    }
}

/// Value selected in a panel column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickChange {
    /// Numeric cell of the hour, minute or second column.
    Number(u32),
    /// Text cell, such as a meridiem label or a zero-padded number.
    Label(String),
}

impl PickChange {
    fn as_number(&self) -> Option<u32> {
        match self {
            PickChange::Number(value) => Some(*value),
            PickChange::Label(label) => label.trim().parse().ok(),
        }
    }
}

impl From<u32> for PickChange {
    fn from(value: u32) -> Self {
        PickChange::Number(value)
    }
}

impl From<&str> for PickChange {
    fn from(label: &str) -> Self {
        PickChange::Label(label.to_owned())
    }
}

/// A selection made in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePick {
    /// Column the selection was made in.
    pub column: PickerColumn,
    /// Selected cell.
    pub change: PickChange,
    /// Slot of the panel value the pick applies to; always 0 for a single
    /// picker.
    pub index: usize,
    /// Time the panel was showing when the pick was made.
    pub reference: NaiveTime,
}

impl TimePick {
    /// Creates a pick for slot 0.
    pub fn new(column: PickerColumn, change: impl Into<PickChange>, reference: NaiveTime) -> Self {
        Self {
            column,
            change: change.into(),
            index: 0,
            reference,
        }
    }

    /// Applies the pick to `base`.
    ///
    /// Returns `None` when the cell does not fit the column.
    pub fn apply(&self, base: NaiveTime) -> Option<NaiveTime> {
        match self.column.field() {
            Some(field) => self.change.as_number().map(|value| field.apply(base, value)),
            None => match &self.change {
                PickChange::Label(label) => {
                    meridiem_for_label(label).map(|meridiem| meridiem.apply(base))
                }
                PickChange::Number(_) => None,
            },
        }
    }
}

/// Increment granularity of the panel columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    /// Hour step.
    pub hour: u32,
    /// Minute step.
    pub minute: u32,
    /// Second step.
    pub second: u32,
}

impl Steps {
    /// Creates steps for hour, minute and second.
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Step for `field`, never zero and never past the field range.
    pub fn get(&self, field: TimeField) -> u32 {
        let step = match field {
            TimeField::Hour => self.hour,
            TimeField::Minute => self.minute,
            TimeField::Second => self.second,
        };
        normalize_step(step, field.max())
    }
}

impl Default for Steps {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Props handed to the selection panel collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelProps {
    /// Pattern deciding which columns are shown.
    pub format: TimeFormat,
    /// Times the panel highlights, one per slot.
    pub value: SmallVec<[NaiveTime; 1]>,
    /// Whether the picker is disabled.
    pub disabled: bool,
    /// Whether the panel is open.
    pub visible: bool,
    /// Column increments.
    pub steps: Steps,
    /// Whether disabled cells are hidden instead of greyed out.
    pub hide_disabled_time: bool,
    /// Predicate marking cells as disabled.
    pub disable_time: Option<DisableTime>,
}

/// Identifier of an on-screen region owned by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

/// Regions counted as "inside" the picker for outside-click handling.
///
/// Detection arms once both the input root and the panel are registered.
#[derive(Debug, Clone, Default)]
pub(crate) struct OwnedRegions {
    regions: SmallVec<[RegionId; 2]>,
}

impl OwnedRegions {
    pub(crate) fn register(&mut self, region: RegionId) {
        if !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.regions.len() > 1
    }

    /// Whether a press in `region` lands outside every owned region.
    pub(crate) fn is_outside(&self, region: Option<RegionId>) -> bool {
        region.is_none_or(|region| !self.regions.contains(&region))
    }
}

fn normalize_step(step: u32, max: u32) -> u32 {
    if step == 0 { 1 } else { step.min(max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).expect("valid time")
    }

    #[test]
    fn labels_map_to_meridiem() {
        assert_eq!(meridiem_for_label("AM"), Some(Meridiem::Am));
        assert_eq!(meridiem_for_label("下午"), Some(Meridiem::Pm));
        assert_eq!(meridiem_for_label("noon"), None);
    }

    #[test]
    fn picks_apply_to_their_column() {
        let base = time(9, 15, 30);
        let minute = TimePick::new(PickerColumn::Minute, 45u32, base);
        assert_eq!(minute.apply(base), Some(time(9, 45, 30)));

        let padded = TimePick::new(PickerColumn::Second, "05", base);
        assert_eq!(padded.apply(base), Some(time(9, 15, 5)));

        let pm = TimePick::new(PickerColumn::Meridiem, "pm", base);
        assert_eq!(pm.apply(base), Some(time(21, 15, 30)));

        let am_again = TimePick::new(PickerColumn::Meridiem, "am", base);
        assert_eq!(am_again.apply(base), Some(base));

        let mismatched = TimePick::new(PickerColumn::Meridiem, 3u32, base);
        assert_eq!(mismatched.apply(base), None);
    }

    #[test]
    fn steps_are_normalized() {
        let steps = Steps::new(0, 15, 90);
        assert_eq!(steps.get(TimeField::Hour), 1);
        assert_eq!(steps.get(TimeField::Minute), 15);
        assert_eq!(steps.get(TimeField::Second), 59);
    }

    #[test]
    fn regions_arm_after_two_registrations() {
        let mut regions = OwnedRegions::default();
        regions.register(RegionId(1));
        regions.register(RegionId(1));
        assert!(!regions.is_armed());
        regions.register(RegionId(2));
        assert!(regions.is_armed());
        assert!(!regions.is_outside(Some(RegionId(2))));
        assert!(regions.is_outside(Some(RegionId(3))));
        assert!(regions.is_outside(None));
    }
}
