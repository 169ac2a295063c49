use crate::panels::ChartPanel;
use crate::{JobStatus, PromptId, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A dashboard page was shown with this breadcrumb trail and chart panels.
    PageOpened {
        breadcrumb: Vec<String>,
        panels: Vec<ChartPanel>,
    },
    /// The user left the page; all polling stops.
    NavigatedAway,
    /// The repeating poll timer ticked.
    TimerFired,
    /// The schedule endpoint answered with a decodable body.
    ScheduleReceived {
        request_id: RequestId,
        status: JobStatus,
    },
    /// Transport failure, non-2xx status or undecodable body.
    ScheduleFailed {
        request_id: RequestId,
        reason: String,
    },
    /// User answered the "reload the view?" prompt.
    PromptAnswered(PromptAnswer),
    /// The prompt timed out on screen.
    PromptExpired { prompt_id: PromptId },
    /// User switched to another chart panel.
    PanelActivated { id: String },
    /// A panel finished rendering and reported whether it has data to show.
    PanelDataChanged { id: String, has_data: bool },
}
