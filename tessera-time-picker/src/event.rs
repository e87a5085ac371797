//! Events consumed and emitted by the time picker.

use chrono::NaiveTime;
use smallvec::SmallVec;

use crate::{
    input::{SegmentEdit, TimeField},
    panel::{RegionId, TimePick},
};

/// Everything the picker reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum TimePickerEvent {
    /// The input group was clicked; opens the panel unless disabled.
    ClickInput,
    /// A segment of the text input changed.
    InputChange {
        /// Edited segment.
        field: TimeField,
        /// New content of the segment.
        edit: SegmentEdit,
    },
    /// A segment lost focus while untouched or invalid.
    InputBlur {
        /// Segment that lost focus.
        field: TimeField,
    },
    /// The input's am/pm toggle was pressed.
    ToggleMeridiem,
    /// The input root or the panel was mounted at `region`.
    Mounted(RegionId),
    /// A cell was picked in the panel.
    TimePick(TimePick),
    /// The panel's confirm button was pressed.
    Confirm,
    /// The panel's "now" button was pressed.
    Now,
    /// The panel reported a visibility change.
    PanelVisibleChange(bool),
    /// A pointer press landed in `region`, or in no known region.
    PointerDown(Option<RegionId>),
    /// The trailing icon was clicked; clears when the clear icon is shown.
    Clear,
}

/// Notifications sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePickerEmit {
    /// The model value after an output pass.
    Change(Option<NaiveTime>),
    /// The panel opened.
    Open,
    /// The panel closed.
    Close,
}

/// Notifications produced by one dispatch, in order.
pub type Emitted = SmallVec<[TimePickerEmit; 2]>;
