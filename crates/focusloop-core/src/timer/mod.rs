mod engine;
mod phase;
mod view;

pub use engine::{TimerEngine, TimerState};
pub use phase::{Phase, BREAK_SECS, FOCUS_SECS};
pub use view::{format_time, Controls, NullSink, PresentationSink, RecordingSink, TimerView};
