use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::TaskRequest;

/// Wall-clock format the schedule endpoint uses for `succeeded` and `nextTime`.
pub const SCHEDULE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Form body of the schedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleForm<'a> {
    pub task_name: &'a str,
    pub task_key: &'a str,
}

impl<'a> From<&'a TaskRequest> for ScheduleForm<'a> {
    fn from(task: &'a TaskRequest) -> Self {
        Self {
            task_name: &task.task_name,
            task_key: &task.task_key,
        }
    }
}

/// JSON body returned by the schedule endpoint.
///
/// Every field is optional: an application error comes back as `{"error": ..}`
/// alone, and `nextTime` is only sent once the task has succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub succeeded: Option<String>,
    #[serde(default)]
    pub next_time: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScheduleResponse {
    pub fn succeeded_at(&self) -> Option<NaiveDateTime> {
        self.succeeded.as_deref().and_then(parse_schedule_time)
    }

    pub fn next_time_at(&self) -> Option<NaiveDateTime> {
        self.next_time.as_deref().and_then(parse_schedule_time)
    }
}

/// Parse a server timestamp; unparseable values are dropped rather than failing
/// the whole response.
pub fn parse_schedule_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), SCHEDULE_TIME_FORMAT).ok()
}
