use std::sync::mpsc;
use std::thread;

use pricewatch_core::{Effect, JobState, JobStatus, Msg};
use pricewatch_engine::{EngineEvent, EngineEvents, EngineHandle, ScheduleResponse, TaskRequest};
use pricewatch_logging::{watch_debug, watch_info, watch_warn};

use super::app::AppEvent;
use super::ui;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: EngineEvents, msg_tx: mpsc::Sender<AppEvent>) -> Self {
        spawn_event_loop(events, msg_tx.clone());
        Self { engine, msg_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestSchedule { request_id, task } => {
                    watch_info!(
                        "RequestSchedule request_id={} task={} key={}",
                        request_id,
                        task.task_name,
                        task.task_key
                    );
                    self.engine.fetch(
                        request_id,
                        TaskRequest {
                            task_name: task.task_name,
                            task_key: task.task_key,
                        },
                    );
                }
                Effect::CancelRequest { request_id } => {
                    watch_debug!("CancelRequest request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
                Effect::StartTimer { period } => self.engine.start_timer(period),
                Effect::StopTimer => self.engine.stop_timer(),
                Effect::ShowRefreshPrompt {
                    prompt_id,
                    expires_after,
                } => {
                    ui::present(&ui::render::render_prompt());
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(expires_after);
                        let _ = msg_tx.send(AppEvent::Core(Msg::PromptExpired { prompt_id }));
                    });
                }
                Effect::DismissPrompt { prompt_id } => {
                    watch_debug!("Prompt {} dismissed", prompt_id);
                }
                Effect::ReloadPanel { id } => {
                    watch_info!("Reloading chart panel {}", id);
                    ui::present(&[format!("重新載入圖表 {id}")]);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let msg = match event {
                EngineEvent::TimerFired => Msg::TimerFired,
                EngineEvent::ScheduleFetched { request_id, result } => match result {
                    Ok(response) => Msg::ScheduleReceived {
                        request_id,
                        status: map_response(response),
                    },
                    Err(err) => {
                        watch_warn!("Schedule request {} failed: {}", request_id, err.kind);
                        Msg::ScheduleFailed {
                            request_id,
                            reason: err.to_string(),
                        }
                    }
                },
            };
            if msg_tx.send(AppEvent::Core(msg)).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_response(response: ScheduleResponse) -> JobStatus {
    JobStatus {
        state: response.state.as_deref().map(JobState::from_wire),
        succeeded: response.succeeded_at(),
        next_time: response.next_time_at(),
        error: response.error,
    }
}
