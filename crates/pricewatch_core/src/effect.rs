use std::time::Duration;

use crate::{PromptId, RequestId, TaskDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestSchedule {
        request_id: RequestId,
        task: TaskDescriptor,
    },
    CancelRequest {
        request_id: RequestId,
    },
    /// Start the repeating poll timer, replacing any running one.
    StartTimer {
        period: Duration,
    },
    StopTimer,
    ShowRefreshPrompt {
        prompt_id: PromptId,
        expires_after: Duration,
    },
    DismissPrompt {
        prompt_id: PromptId,
    },
    ReloadPanel {
        id: String,
    },
}
