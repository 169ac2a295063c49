//! Pricewatch engine: schedule endpoint client, poll timer and effect execution.
mod client;
mod engine;
mod sink;
mod ticker;
mod types;
mod wire;

pub use client::{
    cookie_value, ClientSettings, ReqwestScheduleClient, ScheduleClient, CSRF_COOKIE, CSRF_HEADER,
    DEFAULT_SCHEDULE_PATH,
};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use sink::{ChannelEventSink, EventSink};
pub use ticker::Ticker;
pub use types::{EngineEvent, FailureKind, FetchError, RequestId, TaskRequest};
pub use wire::{parse_schedule_time, ScheduleForm, ScheduleResponse, SCHEDULE_TIME_FORMAT};
