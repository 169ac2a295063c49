use std::sync::Arc;
use std::time::Duration;

use pricewatch_engine::{
    EngineEvent, EngineHandle, FetchError, ScheduleClient, ScheduleResponse, TaskRequest,
};

/// Answers every request after `delay` with the task name echoed in `state`.
struct FakeClient {
    delay: Duration,
}

#[async_trait::async_trait]
impl ScheduleClient for FakeClient {
    async fn fetch_schedule(&self, task: &TaskRequest) -> Result<ScheduleResponse, FetchError> {
        let delay = if task.task_key.starts_with("slow") {
            self.delay
        } else {
            Duration::ZERO
        };
        tokio::time::sleep(delay).await;
        Ok(ScheduleResponse {
            state: Some(task.task_name.clone()),
            ..ScheduleResponse::default()
        })
    }
}

fn task(key: &str) -> TaskRequest {
    TaskRequest {
        task_name: "SUCCESS".to_string(),
        task_key: key.to_string(),
    }
}

fn spawn_engine() -> (EngineHandle, pricewatch_engine::EngineEvents) {
    EngineHandle::with_client(Arc::new(FakeClient {
        delay: Duration::from_millis(300),
    }))
    .expect("engine")
}

fn fetched_id(event: Option<EngineEvent>) -> Option<u64> {
    match event {
        Some(EngineEvent::ScheduleFetched { request_id, .. }) => Some(request_id),
        _ => None,
    }
}

#[test]
fn fetch_reports_result_with_its_request_id() {
    let (engine, events) = spawn_engine();
    engine.fetch(7, task("fast"));

    match events.recv_timeout(Duration::from_secs(2)) {
        Some(EngineEvent::ScheduleFetched { request_id, result }) => {
            assert_eq!(request_id, 7);
            assert_eq!(result.unwrap().state.as_deref(), Some("SUCCESS"));
        }
        other => panic!("unexpected event {other:?}"),
    }
    engine.shutdown();
}

#[test]
fn cancelled_request_reports_nothing() {
    let (engine, events) = spawn_engine();
    engine.fetch(1, task("slow"));
    engine.cancel(1);

    assert_eq!(events.recv_timeout(Duration::from_millis(600)), None);
    engine.shutdown();
}

#[test]
fn cancelling_another_id_leaves_the_request_running() {
    let (engine, events) = spawn_engine();
    engine.fetch(1, task("slow"));
    engine.cancel(99);

    assert_eq!(fetched_id(events.recv_timeout(Duration::from_secs(2))), Some(1));
    engine.shutdown();
}

#[test]
fn new_fetch_supersedes_the_one_in_flight() {
    let (engine, events) = spawn_engine();
    engine.fetch(1, task("slow"));
    engine.fetch(2, task("fast"));

    assert_eq!(fetched_id(events.recv_timeout(Duration::from_secs(2))), Some(2));
    assert_eq!(events.recv_timeout(Duration::from_millis(600)), None);
    engine.shutdown();
}

#[test]
fn timer_ticks_until_stopped() {
    let (engine, events) = spawn_engine();
    engine.start_timer(Duration::from_millis(40));

    assert_eq!(
        events.recv_timeout(Duration::from_secs(2)),
        Some(EngineEvent::TimerFired)
    );

    engine.stop_timer();
    std::thread::sleep(Duration::from_millis(100));
    while events.try_recv().is_some() {}
    assert_eq!(events.recv_timeout(Duration::from_millis(200)), None);
    engine.shutdown();
}
