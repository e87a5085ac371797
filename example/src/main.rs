//! Replays a short editing session against a headless time picker and logs
//! what a renderer would draw after each step.
//!
//! Run with `RUST_LOG=debug` to see the picker's own tracing output.

use std::sync::Arc;

use chrono::NaiveTime;
use tessera_time_picker::{
    FixedClock, InputTime, PickerColumn, RegionId, SegmentEdit, TimeField, TimePick, TimePicker,
    TimePickerArgs, TimePickerEvent,
};
use tracing::info;

const INPUT_REGION: RegionId = RegionId(1);
const PANEL_REGION: RegionId = RegionId(2);

fn main() {
    init_tracing();

    let Some(now) = NaiveTime::from_hms_opt(13, 5, 0) else {
        return;
    };
    let args = TimePickerArgs::default()
        .format("hh:mm:ss a")
        .clearable(true)
        .allow_input(true)
        .placeholder("Select time")
        .disable_time(|hour, _, _| hour < 6)
        .on_change(|value| info!(?value, "change"))
        .on_open(|| info!("open"))
        .on_close(|| info!("close"));
    let clock = Arc::new(FixedClock::new(now));
    let picker = TimePicker::with_clock(&args, clock.clone());

    let reference = picker.with(|state| state.panel_value()[0]);
    let script = [
        TimePickerEvent::Mounted(INPUT_REGION),
        TimePickerEvent::Mounted(PANEL_REGION),
        TimePickerEvent::ClickInput,
        TimePickerEvent::InputChange {
            field: TimeField::Hour,
            edit: SegmentEdit::Value(9),
        },
        TimePickerEvent::TimePick(TimePick::new(PickerColumn::Minute, 30u32, reference)),
        TimePickerEvent::ToggleMeridiem,
        TimePickerEvent::Confirm,
        TimePickerEvent::ClickInput,
        TimePickerEvent::PointerDown(None),
        TimePickerEvent::Clear,
        TimePickerEvent::Now,
    ];

    for event in script {
        if event == TimePickerEvent::Now {
            // A few minutes pass before the user asks for "now".
            if let Some(later) = NaiveTime::from_hms_opt(13, 12, 40) {
                clock.set(later);
            }
        }
        info!(?event, "send");
        picker.send(event);
        picker.with(|state| {
            info!(
                display = %render(state.input_time()),
                value = ?state.value_text(),
                panel_open = state.is_panel_visible(),
                icon = ?state.trailing_icon(),
                "state"
            );
        });
    }
}

fn render(input: &InputTime) -> String {
    let segment = |field| {
        input
            .segment(field)
            .map_or_else(|| "--".to_owned(), ToString::to_string)
    };
    format!(
        "{}:{}:{} {}",
        segment(TimeField::Hour),
        segment(TimeField::Minute),
        segment(TimeField::Second),
        input.meridiem
    )
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            match tracing_subscriber::EnvFilter::try_new("error,example=info,tessera_time_picker=info")
            {
                Ok(filter) => filter,
                Err(_) => tracing_subscriber::EnvFilter::new("error"),
            }
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
