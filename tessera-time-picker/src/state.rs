//! Time picker state and its event handlers.
//!
//! Every handler mutates the state in place. [`TimePickerState::dispatch`]
//! runs a handler, then the output pass when the selected time was
//! reassigned, and returns what the host should be told.

use std::{fmt, mem, sync::Arc};

use chrono::{NaiveTime, Timelike};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::{
    callback::DisableTime,
    clock::{Clock, SystemClock},
    event::{Emitted, TimePickerEmit, TimePickerEvent},
    format::TimeFormat,
    input::{InputProps, InputTime, Meridiem, SegmentEdit, SegmentValue, TimeField},
    panel::{OwnedRegions, PanelProps, RegionId, TimePick},
    picker::{Size, TimePickerArgs, TimeValue},
};

/// Icon shown at the trailing edge of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingIcon {
    /// Decorative clock icon.
    Time,
    /// Clickable clear icon.
    Clear,
}

/// What the renderer needs for the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootProps {
    /// Component size.
    pub size: Size,
    /// Extra class name from the args.
    pub class_name: String,
    /// Whether the picker is disabled.
    pub disabled: bool,
    /// Whether the panel is open.
    pub active: bool,
}

/// Holds the selection, its projection and the panel state.
pub struct TimePickerState {
    args: TimePickerArgs,
    clock: Arc<dyn Clock>,
    time: Option<NaiveTime>,
    input_time: InputTime,
    panel_visible: bool,
    need_clear: bool,
    regions: OwnedRegions,
    time_assigned: bool,
    pending: Emitted,
}

impl TimePickerState {
    /// Creates the state from `args`, reading the local wall clock.
    pub fn new(args: &TimePickerArgs) -> Self {
        Self::with_clock(args, Arc::new(SystemClock))
    }

    /// Creates the state from `args`, reading `clock`.
    pub fn with_clock(args: &TimePickerArgs, clock: Arc<dyn Clock>) -> Self {
        let time = args
            .initial_value()
            .and_then(|value| value.resolve(&args.format));
        let input_time = match args.initial_value() {
            Some(_) => args.format.project(time),
            None => InputTime::blank(),
        };
        Self {
            args: args.clone(),
            clock,
            time,
            input_time,
            panel_visible: false,
            need_clear: false,
            regions: OwnedRegions::default(),
            time_assigned: false,
            pending: SmallVec::new(),
        }
    }

    /// The selected time.
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// The current input projection.
    pub fn input_time(&self) -> &InputTime {
        &self.input_time
    }

    /// The display pattern.
    pub fn format(&self) -> &TimeFormat {
        &self.args.format
    }

    /// The configuration the state was created with.
    pub fn args(&self) -> &TimePickerArgs {
        &self.args
    }

    /// Whether the panel is open.
    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Whether the clear icon is offered.
    pub fn clear_visible(&self) -> bool {
        self.args.clearable && self.time.is_some()
    }

    /// Icon to show at the trailing edge.
    pub fn trailing_icon(&self) -> TrailingIcon {
        if self.clear_visible() {
            TrailingIcon::Clear
        } else {
            TrailingIcon::Time
        }
    }

    /// The selection written out with the picker's format.
    pub fn value_text(&self) -> Option<String> {
        self.time.map(|time| self.args.format.render(time))
    }

    /// Whether every segment has text; only used for styling.
    pub fn is_text_complete(&self) -> bool {
        self.input_time.is_complete()
    }

    /// Times handed to the panel: the selection, or now when nothing is
    /// selected.
    pub fn panel_value(&self) -> SmallVec<[NaiveTime; 1]> {
        smallvec![self.time.unwrap_or_else(|| self.clock.now())]
    }

    /// Props for the root element wrapping input and panel.
    pub fn root_props(&self) -> RootProps {
        RootProps {
            size: self.args.size,
            class_name: self.args.class_name.clone(),
            disabled: self.args.disabled,
            active: self.panel_visible,
        }
    }

    /// Props for the segmented input.
    pub fn input_props(&self) -> InputProps {
        InputProps {
            size: self.args.size,
            value: self.input_time.clone(),
            format: self.args.format.clone(),
            allow_input: self.args.allow_input,
            placeholder: self.args.placeholder.clone(),
            disabled: self.args.disabled,
            active: self.panel_visible,
        }
    }

    /// Props for the selection panel.
    pub fn panel_props(&self) -> PanelProps {
        PanelProps {
            format: self.args.format.clone(),
            value: self.panel_value(),
            disabled: self.args.disabled,
            visible: self.panel_visible,
            steps: self.args.steps,
            hide_disabled_time: self.args.hide_disabled_time,
            disable_time: self.args.disable_time.clone(),
        }
    }

    /// Handles one event and returns the notifications it produced.
    pub fn dispatch(&mut self, event: TimePickerEvent) -> Emitted {
        trace!(?event, "time picker event");
        self.time_assigned = false;
        match event {
            TimePickerEvent::ClickInput => self.click_input(),
            TimePickerEvent::InputChange { field, edit } => self.input_change(field, edit),
            TimePickerEvent::InputBlur { field } => self.blur_default(field),
            TimePickerEvent::ToggleMeridiem => self.toggle_meridiem(),
            TimePickerEvent::Mounted(region) => self.mount(region),
            TimePickerEvent::TimePick(pick) => self.pick_time(&pick),
            TimePickerEvent::Confirm => self.confirm(),
            TimePickerEvent::Now => self.now(),
            TimePickerEvent::PanelVisibleChange(visible) => self.set_panel_visible(visible),
            TimePickerEvent::PointerDown(region) => self.pointer_down(region),
            TimePickerEvent::Clear => self.clear(),
        }
        self.finish_dispatch()
    }

    /// Handles a "now" press whose veto was decided by the caller.
    ///
    /// [`TimePicker`](crate::TimePicker) evaluates the host's predicate
    /// before taking its lock and forwards the outcome here.
    pub fn dispatch_now(&mut self, now: NaiveTime, disabled: bool) -> Emitted {
        trace!(%now, disabled, "time picker now");
        self.time_assigned = false;
        self.select_now(now, disabled);
        self.finish_dispatch()
    }

    /// Drains notifications queued by direct handler calls.
    pub fn take_emitted(&mut self) -> Emitted {
        mem::take(&mut self.pending)
    }

    /// Opens the panel unless the picker is disabled.
    pub fn click_input(&mut self) {
        if self.args.disabled {
            debug!("time picker is disabled, ignoring click");
            return;
        }
        self.set_panel_visible(true);
    }

    /// Applies a segment edit from the text input.
    ///
    /// Erasing blanks the segment and zeroes that field. The new value is
    /// reported without re-projecting, so the blank stays visible.
    pub fn input_change(&mut self, field: TimeField, edit: SegmentEdit) {
        let value = match edit {
            SegmentEdit::Erase => {
                *self.input_time.segment_mut(field) = None;
                if let Some(time) = self.time {
                    self.time = Some(field.apply(time, 0));
                    self.pending.push(TimePickerEmit::Change(self.time));
                }
                return;
            }
            SegmentEdit::Value(value) => value,
        };
        let base = self.time.unwrap_or(NaiveTime::MIN);
        self.select(field.apply(base, value));
    }

    /// Fills a segment with the two-digit zero default.
    pub fn blur_default(&mut self, field: TimeField) {
        *self.input_time.segment_mut(field) = Some(SegmentValue::Text("00".to_owned()));
    }

    /// Flips am and pm by moving the hour twelve hours.
    pub fn toggle_meridiem(&mut self) {
        let Some(time) = self.time else {
            debug!("no time selected, ignoring meridiem toggle");
            return;
        };
        let flipped = Meridiem::from_hour(time.hour()).toggled().apply(time);
        self.input_change(TimeField::Hour, SegmentEdit::Value(flipped.hour()));
    }

    /// Registers a region owned by the input or the panel.
    pub fn mount(&mut self, region: RegionId) {
        self.regions.register(region);
    }

    /// Applies a panel selection.
    ///
    /// The change lands on the panel's reference time, not on the stored
    /// selection.
    pub fn pick_time(&mut self, pick: &TimePick) {
        if let Some(time) = self.time.filter(|time| *time != pick.reference) {
            debug!(
                stored = %time,
                reference = %pick.reference,
                "panel reference differs from selection"
            );
        }
        match pick.apply(pick.reference) {
            Some(time) => self.select(time),
            None => debug!(?pick, "ignoring pick that does not fit its column"),
        }
    }

    /// Closes the panel and runs the output pass.
    pub fn confirm(&mut self) {
        self.set_panel_visible(false);
        self.output();
    }

    /// Closes the panel and selects the current time unless it is disabled.
    pub fn now(&mut self) {
        let now = self.current_time();
        let disabled = is_disabled(self.args.disable_time.as_ref(), now);
        self.select_now(now, disabled);
    }

    /// Reads the picker's clock.
    pub fn current_time(&self) -> NaiveTime {
        self.clock.now()
    }

    /// Clears the selection when the clear icon is shown.
    pub fn clear(&mut self) {
        if !self.clear_visible() {
            return;
        }
        self.assign(None);
        self.need_clear = true;
        self.input_time = InputTime::blank();
    }

    /// Records the panel visibility, notifying open or close on a flip.
    pub fn set_panel_visible(&mut self, visible: bool) {
        if self.panel_visible == visible {
            return;
        }
        self.panel_visible = visible;
        self.pending.push(if visible {
            TimePickerEmit::Open
        } else {
            TimePickerEmit::Close
        });
    }

    /// Closes the panel when a press lands outside the owned regions.
    pub fn pointer_down(&mut self, region: Option<RegionId>) {
        if self.regions.is_armed() && self.regions.is_outside(region) {
            self.set_panel_visible(false);
        }
    }

    /// Reconciles the projection with the selection and reports the model
    /// value.
    ///
    /// A pending clear wins once; otherwise the selection is projected, or
    /// the current time when nothing is selected.
    pub fn output(&mut self) -> Option<NaiveTime> {
        self.sync_projection();
        self.pending.push(TimePickerEmit::Change(self.time));
        self.time
    }

    /// Replaces the selection with a host-side value.
    pub fn set_value(&mut self, value: Option<&TimeValue>) {
        self.time = value.and_then(|value| value.resolve(&self.args.format));
        self.need_clear = false;
        self.sync_projection();
        debug!(time = ?self.time, "time picker value set by host");
    }

    fn select_now(&mut self, now: NaiveTime, disabled: bool) {
        self.set_panel_visible(false);
        if disabled {
            debug!(%now, "current time is disabled");
            return;
        }
        self.select(now);
    }

    fn finish_dispatch(&mut self) -> Emitted {
        if mem::take(&mut self.time_assigned) {
            self.output();
        }
        self.take_emitted()
    }

    fn select(&mut self, time: NaiveTime) {
        self.assign(Some(time));
        self.input_time = self.args.format.project(Some(time));
    }

    fn assign(&mut self, time: Option<NaiveTime>) {
        self.time = time;
        self.time_assigned = true;
    }

    fn sync_projection(&mut self) {
        let shown = if mem::take(&mut self.need_clear) {
            None
        } else {
            Some(self.time.unwrap_or_else(|| self.clock.now()))
        };
        self.input_time = self.args.format.project(shown);
    }
}

/// Whether `predicate` vetoes `time`; no predicate allows everything.
pub(crate) fn is_disabled(predicate: Option<&DisableTime>, time: NaiveTime) -> bool {
    predicate.is_some_and(|p| p.is_disabled(time.hour(), time.minute(), time.second()))
}

impl fmt::Debug for TimePickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimePickerState")
            .field("format", &self.args.format)
            .field("time", &self.time)
            .field("input_time", &self.input_time)
            .field("panel_visible", &self.panel_visible)
            .field("need_clear", &self.need_clear)
            .finish_non_exhaustive()
    }
}
