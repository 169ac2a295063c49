use std::time::Duration;

use chrono::NaiveDateTime;

use crate::panels::{ChartPanel, ChartPanels};
use crate::task::TaskDescriptor;
use crate::view_model::{AppViewModel, BannerStatus, BannerView};

pub type RequestId = u64;
pub type PromptId = u64;

/// Repeat period while the builder is running.
pub const STARTED_POLL_PERIOD: Duration = Duration::from_secs(30);
/// Repeat period once the builder has finished.
pub const SUCCESS_POLL_PERIOD: Duration = Duration::from_secs(60);
/// How long the refresh prompt stays on screen before it dismisses itself.
pub const PROMPT_DURATION: Duration = Duration::from_secs(10);

/// Celery task state as reported by the schedule endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Received,
    Started,
    Success,
    Failure,
    Retry,
    Revoked,
    Other(String),
}

impl JobState {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "PENDING" => JobState::Pending,
            "RECEIVED" => JobState::Received,
            "STARTED" => JobState::Started,
            "SUCCESS" => JobState::Success,
            "FAILURE" => JobState::Failure,
            "RETRY" => JobState::Retry,
            "REVOKED" => JobState::Revoked,
            other => JobState::Other(other.to_string()),
        }
    }

    /// Polling cadence this state asks for, if any.
    pub fn poll_period(&self) -> Option<Duration> {
        match self {
            JobState::Started => Some(STARTED_POLL_PERIOD),
            JobState::Success => Some(SUCCESS_POLL_PERIOD),
            _ => None,
        }
    }
}

/// Decoded schedule response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobStatus {
    /// Absent when the server only reported an error.
    pub state: Option<JobState>,
    pub succeeded: Option<NaiveDateTime>,
    pub next_time: Option<NaiveDateTime>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    task: Option<TaskDescriptor>,
    previous_state: Option<JobState>,
    current_state: Option<JobState>,
    in_flight: Option<RequestId>,
    timer_period: Option<Duration>,
    last_status: Option<JobStatus>,
    panels: ChartPanels,
    prompt: Option<PromptId>,
    next_request_id: RequestId,
    next_prompt_id: PromptId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            task: self.task.clone(),
            banner: self.banner(),
            panels: self.panels.as_slice().to_vec(),
            prompt_open: self.prompt.is_some(),
            timer_period: self.timer_period,
            polling: self.in_flight.is_some() || self.timer_period.is_some(),
            dirty: self.dirty,
        }
    }

    fn banner(&self) -> Option<BannerView> {
        let status = self.last_status.as_ref()?;
        if self.panels.active().is_some_and(|panel| !panel.has_data) {
            return None;
        }
        let banner_status = match status.state {
            Some(JobState::Success) => BannerStatus::NextUpdate(status.next_time),
            _ => BannerStatus::Updating,
        };
        Some(BannerView {
            last_success: status.succeeded,
            status: banner_status,
        })
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn task(&self) -> Option<&TaskDescriptor> {
        self.task.as_ref()
    }

    pub fn previous_state(&self) -> Option<&JobState> {
        self.previous_state.as_ref()
    }

    pub fn current_state(&self) -> Option<&JobState> {
        self.current_state.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn timer_period(&self) -> Option<Duration> {
        self.timer_period
    }

    pub fn prompt(&self) -> Option<PromptId> {
        self.prompt
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_task(&mut self, task: Option<TaskDescriptor>) {
        if self.task != task {
            self.task = task;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_panels(&mut self, panels: Vec<ChartPanel>) {
        self.panels = ChartPanels::new(panels);
        self.mark_dirty();
    }

    pub(crate) fn panels_mut(&mut self) -> &mut ChartPanels {
        &mut self.panels
    }

    /// Allocate an id for a new request and record it as the one in flight.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        self.next_request_id
    }

    pub(crate) fn take_in_flight(&mut self) -> Option<RequestId> {
        self.in_flight.take()
    }

    pub(crate) fn set_timer_period(&mut self, period: Option<Duration>) {
        self.timer_period = period;
        self.mark_dirty();
    }

    pub(crate) fn observe_state(&mut self, state: JobState) {
        self.previous_state = self.current_state.replace(state);
    }

    pub(crate) fn set_last_status(&mut self, status: JobStatus) {
        self.last_status = Some(status);
        self.mark_dirty();
    }

    pub(crate) fn open_prompt(&mut self) -> PromptId {
        self.next_prompt_id += 1;
        self.prompt = Some(self.next_prompt_id);
        self.mark_dirty();
        self.next_prompt_id
    }

    pub(crate) fn close_prompt(&mut self) -> Option<PromptId> {
        let closed = self.prompt.take();
        if closed.is_some() {
            self.mark_dirty();
        }
        closed
    }

    /// Forget everything observed about the current task's schedule.
    ///
    /// The caller is responsible for cancelling the request and timer the
    /// returned handles refer to. Id counters survive so that late responses
    /// from before the reset can still be told apart.
    pub(crate) fn clear_polling(&mut self) -> (Option<RequestId>, Option<Duration>) {
        let request = self.in_flight.take();
        let timer = self.timer_period.take();
        let had_observations = self.previous_state.is_some()
            || self.current_state.is_some()
            || self.last_status.is_some();
        self.previous_state = None;
        self.current_state = None;
        self.last_status = None;
        if request.is_some() || timer.is_some() || had_observations {
            self.mark_dirty();
        }
        (request, timer)
    }
}
