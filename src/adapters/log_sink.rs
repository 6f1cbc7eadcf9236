//! Event sink that writes structured events to the log.
//!
//! The default sink on every target; tests use their own capturing
//! sinks instead.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

#[derive(Debug, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Watered { plant, value, tick } => {
                info!("watered plant {plant} (sample {value}) at tick {tick}");
            }
            AppEvent::HistoryReport { plant, timestamps } => {
                info!("plant {plant} watering history: {timestamps:?}");
            }
            other => info!("{other:?}"),
        }
    }
}
