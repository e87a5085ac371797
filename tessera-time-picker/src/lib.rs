//! Headless time picker for tessera-ui style components.
//!
//! The picker pairs a segmented text input (hour, minute, second, meridiem)
//! with a dropdown selection panel. This crate owns the state that keeps the
//! two in sync; rendering is left to the host, which draws from
//! [`InputProps`] and [`PanelProps`] and forwards user input as
//! [`TimePickerEvent`]s.
//!
//! # Example
//!
//! ```
//! use tessera_time_picker::{
//!     SegmentEdit, TimeField, TimePicker, TimePickerArgs, TimePickerEvent,
//! };
//!
//! let picker = TimePicker::new(
//!     &TimePickerArgs::default()
//!         .format("HH:mm")
//!         .on_change(|value| println!("selected {value:?}")),
//! );
//!
//! picker.send(TimePickerEvent::ClickInput);
//! picker.send(TimePickerEvent::InputChange {
//!     field: TimeField::Hour,
//!     edit: SegmentEdit::Value(5),
//! });
//! picker.send(TimePickerEvent::Confirm);
//!
//! let hour = picker.with(|state| state.input_time().hour.clone());
//! assert_eq!(hour.map(|h| h.to_string()).as_deref(), Some("05"));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod callback;
pub mod clock;
pub mod error;
pub mod event;
pub mod format;
pub mod input;
pub mod panel;
pub mod picker;
pub mod state;

pub use callback::{Callback, CallbackWith, DisableTime};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TimeParseError;
pub use event::{Emitted, TimePickerEmit, TimePickerEvent};
pub use format::{DEFAULT_TIME_FORMAT, TimeFormat};
pub use input::{InputProps, InputTime, Meridiem, SegmentEdit, SegmentValue, TimeField};
pub use panel::{
    AM_LABELS, PM_LABELS, PanelProps, PickChange, PickerColumn, RegionId, Steps, TimePick,
};
pub use picker::{Size, TimePicker, TimePickerArgs, TimeValue};
pub use state::{RootProps, TimePickerState, TrailingIcon};
