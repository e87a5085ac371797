//! Time picker configuration and the shared handle hosts talk to.
//!
//! ## Usage
//!
//! Build [`TimePickerArgs`], create a [`TimePicker`], forward input and panel
//! events with [`TimePicker::send`], and push host-side value changes back
//! with [`TimePicker::set_value`].

use std::sync::Arc;

use chrono::NaiveTime;
use derive_setters::Setters;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    callback::{Callback, CallbackWith, DisableTime},
    clock::{Clock, SystemClock},
    event::{TimePickerEmit, TimePickerEvent},
    format::TimeFormat,
    panel::Steps,
    state::{TimePickerState, is_disabled},
};

/// A time value supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    /// Text read with the picker's format.
    Text(String),
    /// An already normalized time.
    Time(NaiveTime),
}

impl TimeValue {
    /// Resolves the value against `format`.
    ///
    /// Text that does not match the format resolves to `None`.
    pub fn resolve(&self, format: &TimeFormat) -> Option<NaiveTime> {
        match self {
            TimeValue::Time(time) => Some(*time),
            TimeValue::Text(text) => match format.parse(text) {
                Ok(time) => Some(time),
                Err(err) => {
                    debug!(%err, "ignoring unparseable time value");
                    None
                }
            },
        }
    }
}

impl From<NaiveTime> for TimeValue {
    fn from(time: NaiveTime) -> Self {
        TimeValue::Time(time)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        TimeValue::Text(text.to_owned())
    }
}

impl From<String> for TimeValue {
    fn from(text: String) -> Self {
        TimeValue::Text(text)
    }
}

/// Component size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Size {
    /// Compact.
    Small,
    /// Default size.
    #[default]
    Medium,
    /// Large.
    Large,
}

/// Configuration options for [`TimePicker`].
///
/// `value` and `default_value` are only read when the picker is created;
/// later host writes go through [`TimePicker::set_value`].
#[derive(PartialEq, Clone, Setters)]
pub struct TimePickerArgs {
    /// Controlled initial value; wins over `default_value`.
    #[setters(skip)]
    pub value: Option<TimeValue>,
    /// Uncontrolled initial value.
    #[setters(skip)]
    pub default_value: Option<TimeValue>,
    /// Display pattern.
    #[setters(into)]
    pub format: TimeFormat,
    /// Component size.
    pub size: Size,
    /// Extra class name forwarded to the renderer.
    #[setters(into)]
    pub class_name: String,
    /// Whether the picker ignores clicks on the input.
    pub disabled: bool,
    /// Whether a clear icon is offered while a value is selected.
    pub clearable: bool,
    /// Whether segments accept typed input.
    pub allow_input: bool,
    /// Placeholder shown while blank.
    #[setters(strip_option, into)]
    pub placeholder: Option<String>,
    /// Panel column increments.
    pub steps: Steps,
    /// Whether the panel hides disabled cells.
    pub hide_disabled_time: bool,
    /// Predicate vetoing times.
    #[setters(skip)]
    pub disable_time: Option<DisableTime>,
    /// Listener for model value changes.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<Option<NaiveTime>>>,
    /// Listener for the panel opening.
    #[setters(skip)]
    pub on_open: Option<Callback>,
    /// Listener for the panel closing.
    #[setters(skip)]
    pub on_close: Option<Callback>,
}

impl Default for TimePickerArgs {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            format: TimeFormat::default(),
            size: Size::default(),
            class_name: String::new(),
            disabled: false,
            clearable: false,
            allow_input: false,
            placeholder: None,
            steps: Steps::default(),
            hide_disabled_time: true,
            disable_time: None,
            on_change: None,
            on_open: None,
            on_close: None,
        }
    }
}

impl TimePickerArgs {
    /// Sets the controlled initial value.
    pub fn value(mut self, value: impl Into<TimeValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the uncontrolled initial value.
    pub fn default_value(mut self, value: impl Into<TimeValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the predicate vetoing `(hour, minute, second)` combinations.
    pub fn disable_time<F>(mut self, predicate: F) -> Self
    where
        F: Fn(u32, u32, u32) -> bool + Send + Sync + 'static,
    {
        self.disable_time = Some(DisableTime::new(predicate));
        self
    }

    /// Sets the listener for model value changes.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<NaiveTime>) + Send + Sync + 'static,
    {
        self.on_change = Some(CallbackWith::new(f));
        self
    }

    /// Sets the listener for the panel opening.
    pub fn on_open<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_open = Some(Callback::new(f));
        self
    }

    /// Sets the listener for the panel closing.
    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Callback::new(f));
        self
    }

    /// The value the picker starts from.
    pub fn initial_value(&self) -> Option<&TimeValue> {
        self.value.as_ref().or(self.default_value.as_ref())
    }
}

#[derive(Clone, Default)]
struct Listeners {
    on_change: Option<CallbackWith<Option<NaiveTime>>>,
    on_open: Option<Callback>,
    on_close: Option<Callback>,
}

impl Listeners {
    fn notify(&self, emit: TimePickerEmit) {
        match emit {
            TimePickerEmit::Change(value) => {
                if let Some(on_change) = &self.on_change {
                    on_change.call(value);
                }
            }
            TimePickerEmit::Open => {
                if let Some(on_open) = &self.on_open {
                    on_open.call();
                }
            }
            TimePickerEmit::Close => {
                if let Some(on_close) = &self.on_close {
                    on_close.call();
                }
            }
        }
    }
}

/// Shared handle to a time picker.
///
/// Clones point at the same state. Listeners run after the state lock is
/// released, so they may call back into the handle.
#[derive(Clone)]
pub struct TimePicker {
    state: Arc<RwLock<TimePickerState>>,
    listeners: Listeners,
}

impl TimePicker {
    /// Creates a picker reading the local wall clock.
    pub fn new(args: &TimePickerArgs) -> Self {
        Self::with_clock(args, Arc::new(SystemClock))
    }

    /// Creates a picker reading `clock`.
    pub fn with_clock(args: &TimePickerArgs, clock: Arc<dyn Clock>) -> Self {
        let listeners = Listeners {
            on_change: args.on_change.clone(),
            on_open: args.on_open.clone(),
            on_close: args.on_close.clone(),
        };
        Self {
            state: Arc::new(RwLock::new(TimePickerState::with_clock(args, clock))),
            listeners,
        }
    }

    /// Handles one event and notifies listeners of what it emitted.
    ///
    /// The `disable_time` predicate is evaluated without holding the state
    /// lock, so it may read the picker too.
    pub fn send(&self, event: TimePickerEvent) {
        let emitted = match event {
            TimePickerEvent::Now => {
                let (now, predicate) = self.with(|state| {
                    (state.current_time(), state.args().disable_time.clone())
                });
                let disabled = is_disabled(predicate.as_ref(), now);
                self.state.write().dispatch_now(now, disabled)
            }
            event => self.state.write().dispatch(event),
        };
        for emit in emitted {
            self.listeners.notify(emit);
        }
    }

    /// Applies a host-side value write.
    ///
    /// The write replaces the selection and projection and is not echoed
    /// back as a change.
    pub fn set_value(&self, value: Option<TimeValue>) {
        self.state.write().set_value(value.as_ref());
    }

    /// Reads the state.
    pub fn with<R>(&self, f: impl FnOnce(&TimePickerState) -> R) -> R {
        f(&self.state.read())
    }

    /// The selected time.
    pub fn value(&self) -> Option<NaiveTime> {
        self.state.read().time()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            OnceLock,
            atomic::{AtomicUsize, Ordering},
            mpsc,
        },
        thread,
        time::Duration,
    };

    use chrono::Timelike;
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        clock::FixedClock,
        input::{SegmentEdit, TimeField},
        panel::RegionId,
    };

    fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).expect("valid time")
    }

    fn fixed(hour: u32, minute: u32, second: u32) -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(time(hour, minute, second)))
    }

    #[test]
    fn value_wins_over_default_value() {
        let args = TimePickerArgs::default()
            .default_value("01:00:00")
            .value("02:30:00");
        let picker = TimePicker::with_clock(&args, fixed(12, 0, 0));
        assert_eq!(picker.value(), Some(time(2, 30, 0)));
    }

    #[test]
    fn listeners_receive_emitted_events() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let opens = Arc::new(AtomicUsize::new(0));
        let closes = Arc::new(AtomicUsize::new(0));
        let args = {
            let changes = changes.clone();
            let opens = opens.clone();
            let closes = closes.clone();
            TimePickerArgs::default()
                .on_change(move |value| changes.lock().push(value))
                .on_open(move || {
                    opens.fetch_add(1, Ordering::SeqCst);
                })
                .on_close(move || {
                    closes.fetch_add(1, Ordering::SeqCst);
                })
        };
        let picker = TimePicker::with_clock(&args, fixed(8, 0, 0));

        picker.send(TimePickerEvent::ClickInput);
        picker.send(TimePickerEvent::InputChange {
            field: TimeField::Minute,
            edit: SegmentEdit::Value(45),
        });
        picker.send(TimePickerEvent::Confirm);

        assert_eq!(opens.load(Ordering::SeqCst), 1);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(
            *changes.lock(),
            vec![Some(time(0, 45, 0)), Some(time(0, 45, 0))]
        );
    }

    #[test]
    fn listener_may_write_back_into_the_picker() {
        let slot: Arc<OnceLock<TimePicker>> = Arc::default();
        let args = {
            let slot = slot.clone();
            TimePickerArgs::default().on_change(move |value| {
                let Some(picker) = slot.get() else {
                    return;
                };
                // Host rounds every selection down to the hour.
                let rounded = value.map(|t| TimeField::Minute.apply(t, 0));
                picker.set_value(rounded.map(TimeValue::from));
            })
        };
        let picker = TimePicker::with_clock(&args, fixed(8, 0, 0));
        assert!(slot.set(picker.clone()).is_ok());

        picker.send(TimePickerEvent::InputChange {
            field: TimeField::Hour,
            edit: SegmentEdit::Value(7),
        });
        picker.send(TimePickerEvent::InputChange {
            field: TimeField::Minute,
            edit: SegmentEdit::Value(20),
        });

        assert_eq!(picker.value(), Some(time(7, 0, 0)));
        let minute = picker.with(|s| s.input_time().minute.clone());
        assert_eq!(minute.map(|m| m.to_string()), Some("00".to_owned()));
    }

    #[test]
    fn disable_predicate_may_read_the_picker() {
        let slot: Arc<OnceLock<TimePicker>> = Arc::default();
        let args = {
            let slot = slot.clone();
            TimePickerArgs::default().disable_time(move |hour, _, _| {
                // Veto "now" while a morning time is already selected.
                let selected = slot.get().and_then(TimePicker::value);
                selected.is_some_and(|t| t.hour() < 12) && hour >= 12
            })
        };
        let picker = TimePicker::with_clock(&args, fixed(13, 0, 0));
        assert!(slot.set(picker.clone()).is_ok());

        let (tx, rx) = mpsc::channel();
        let worker = picker.clone();
        thread::spawn(move || {
            worker.send(TimePickerEvent::Now);
            worker.set_value(Some(TimeValue::from("09:00:00")));
            worker.send(TimePickerEvent::Now);
            let _ = tx.send(worker.value());
        });

        let value = rx.recv_timeout(Duration::from_secs(3));
        assert_eq!(value, Ok(Some(time(9, 0, 0))));
    }

    #[test]
    fn outside_press_closes_once_both_regions_mount() {
        let picker = TimePicker::with_clock(&TimePickerArgs::default(), fixed(8, 0, 0));
        picker.send(TimePickerEvent::Mounted(RegionId(1)));
        picker.send(TimePickerEvent::ClickInput);

        picker.send(TimePickerEvent::PointerDown(None));
        assert!(picker.with(|s| s.is_panel_visible()));

        picker.send(TimePickerEvent::Mounted(RegionId(2)));
        picker.send(TimePickerEvent::PointerDown(Some(RegionId(2))));
        assert!(picker.with(|s| s.is_panel_visible()));

        picker.send(TimePickerEvent::PointerDown(Some(RegionId(9))));
        assert!(!picker.with(|s| s.is_panel_visible()));
    }
}
