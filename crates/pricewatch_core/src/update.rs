use std::time::Duration;

use pricewatch_logging::{watch_debug, watch_info, watch_warn};

use crate::{
    resolve_task, AppState, Effect, JobState, JobStatus, Msg, PromptAnswer, RequestId,
    PROMPT_DURATION,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageOpened { breadcrumb, panels } => {
            let mut effects = reset_polling(&mut state);
            state.set_panels(panels);
            match resolve_task(breadcrumb.as_slice()) {
                Some(task) => {
                    state.set_task(Some(task.clone()));
                    let request_id = state.begin_request();
                    watch_info!(
                        "Polling schedule of {} ({}) request_id={}",
                        task.task_name,
                        task.task_key,
                        request_id
                    );
                    effects.push(Effect::RequestSchedule { request_id, task });
                }
                None => {
                    // Nothing builds this page's data, so there is nothing to poll.
                    watch_info!("No builder task for breadcrumb {:?}; polling skipped", breadcrumb);
                    state.set_task(None);
                }
            }
            effects
        }
        Msg::NavigatedAway => {
            let effects = reset_polling(&mut state);
            state.set_task(None);
            effects
        }
        Msg::TimerFired => on_timer_fired(&mut state),
        Msg::ScheduleReceived { request_id, status } => {
            on_schedule_received(&mut state, request_id, status)
        }
        Msg::ScheduleFailed { request_id, reason } => {
            if state.in_flight() == Some(request_id) {
                state.take_in_flight();
                // The timer keeps running and the next tick retries.
                watch_warn!("Schedule request {} failed: {}", request_id, reason);
            } else {
                watch_debug!("Ignoring failure of stale request {}: {}", request_id, reason);
            }
            Vec::new()
        }
        Msg::PromptAnswered(answer) => match state.close_prompt() {
            Some(prompt_id) => {
                let mut effects = vec![Effect::DismissPrompt { prompt_id }];
                if answer == PromptAnswer::Yes {
                    if let Some(id) = state.panels_mut().refresh_active() {
                        effects.push(Effect::ReloadPanel { id });
                    }
                }
                effects
            }
            None => {
                watch_debug!("Answer {:?} ignored, no prompt is open", answer);
                Vec::new()
            }
        },
        Msg::PromptExpired { prompt_id } => {
            if state.prompt() == Some(prompt_id) {
                state.close_prompt();
            }
            Vec::new()
        }
        Msg::PanelActivated { id } => match state.panels_mut().activate(&id) {
            Some(needs_reload) => {
                state.mark_dirty();
                if needs_reload {
                    vec![Effect::ReloadPanel { id }]
                } else {
                    Vec::new()
                }
            }
            None => {
                watch_warn!("Activation of unknown panel {}", id);
                Vec::new()
            }
        },
        Msg::PanelDataChanged { id, has_data } => {
            if state.panels_mut().set_has_data(&id, has_data) {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Cancel whatever is in flight, stop the timer and forget observed states.
/// Produces no effects when nothing is active.
fn reset_polling(state: &mut AppState) -> Vec<Effect> {
    let (request, timer) = state.clear_polling();
    let mut effects = Vec::new();
    if let Some(request_id) = request {
        effects.push(Effect::CancelRequest { request_id });
    }
    if timer.is_some() {
        effects.push(Effect::StopTimer);
    }
    effects
}

fn on_timer_fired(state: &mut AppState) -> Vec<Effect> {
    if state.timer_period().is_none() {
        watch_debug!("Timer tick after reset ignored");
        return Vec::new();
    }
    let Some(task) = state.task().cloned() else {
        return Vec::new();
    };

    let mut effects = Vec::with_capacity(2);
    if let Some(stale) = state.take_in_flight() {
        // Keep a single request in flight: a hung one is replaced, not stacked.
        watch_warn!("Request {} still pending at next tick; superseding it", stale);
        effects.push(Effect::CancelRequest { request_id: stale });
    }
    let request_id = state.begin_request();
    effects.push(Effect::RequestSchedule { request_id, task });
    effects
}

fn on_schedule_received(
    state: &mut AppState,
    request_id: RequestId,
    status: JobStatus,
) -> Vec<Effect> {
    if state.in_flight() != Some(request_id) {
        watch_debug!("Discarding response of stale request {}", request_id);
        return Vec::new();
    }
    state.take_in_flight();

    if let Some(error) = status.error.as_deref() {
        watch_warn!("Schedule endpoint reported: {}", error);
        return Vec::new();
    }
    let Some(job_state) = status.state.clone() else {
        watch_warn!("Schedule response {} carried no state", request_id);
        return Vec::new();
    };

    state.observe_state(job_state.clone());
    let mut effects = Vec::new();
    match job_state.poll_period() {
        Some(period) => {
            ensure_timer(state, period, &mut effects);
            state.set_last_status(status);
        }
        None => {
            watch_info!("Builder task is {:?}; banner left as is", job_state);
        }
    }

    let finished_run = state.previous_state() == Some(&JobState::Started)
        && state.current_state() == Some(&JobState::Success);
    if finished_run {
        if let Some(prompt_id) = state.close_prompt() {
            effects.push(Effect::DismissPrompt { prompt_id });
        }
        let prompt_id = state.open_prompt();
        watch_info!("Builder run finished; offering refresh (prompt {})", prompt_id);
        effects.push(Effect::ShowRefreshPrompt {
            prompt_id,
            expires_after: PROMPT_DURATION,
        });
    }
    effects
}

/// Make sure exactly one timer runs at `period`.
fn ensure_timer(state: &mut AppState, period: Duration, effects: &mut Vec<Effect>) {
    match state.timer_period() {
        Some(current) if current == period => {}
        Some(current) => {
            watch_debug!("Replacing {:?} poll timer with {:?}", current, period);
            effects.push(Effect::StopTimer);
            effects.push(Effect::StartTimer { period });
            state.set_timer_period(Some(period));
        }
        None => {
            effects.push(Effect::StartTimer { period });
            state.set_timer_period(Some(period));
        }
    }
}
