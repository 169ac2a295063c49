use std::sync::{Arc, Mutex};
use std::time::Duration;

use pricewatch_engine::{EngineEvent, EventSink, Ticker};
use tokio::runtime::Handle;

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn ticks(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| **event == EngineEvent::TimerFired)
            .count()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn ticker_with_sink() -> (Ticker, Arc<TestSink>) {
    let sink = Arc::new(TestSink::default());
    let ticker = Ticker::new(Handle::current(), sink.clone());
    (ticker, sink)
}

#[tokio::test(start_paused = true)]
async fn fires_once_per_period_after_a_full_period() {
    let (mut ticker, sink) = ticker_with_sink();
    ticker.start(Duration::from_secs(30));

    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(sink.ticks(), 0);

    tokio::time::sleep(Duration::from_secs(66)).await;
    assert_eq!(sink.ticks(), 3);
    assert_eq!(ticker.period(), Some(Duration::from_secs(30)));
}

#[tokio::test(start_paused = true)]
async fn restarting_with_new_period_replaces_the_timer() {
    let (mut ticker, sink) = ticker_with_sink();
    ticker.start(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(sink.ticks(), 1);

    ticker.start(Duration::from_secs(60));
    // The old 30s timer would have fired at t=60; only the new one may tick, at t=91.
    tokio::time::sleep(Duration::from_secs(59)).await;
    assert_eq!(sink.ticks(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(sink.ticks(), 2);
    assert_eq!(ticker.period(), Some(Duration::from_secs(60)));
}

#[tokio::test(start_paused = true)]
async fn restarting_with_same_period_keeps_the_schedule() {
    let (mut ticker, sink) = ticker_with_sink();
    ticker.start(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(20)).await;

    ticker.start(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(sink.ticks(), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent_and_silences_ticks() {
    let (mut ticker, sink) = ticker_with_sink();
    ticker.stop();
    assert!(!ticker.is_running());

    ticker.start(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(31)).await;
    ticker.stop();
    ticker.stop();

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(sink.ticks(), 1);
    assert!(!ticker.is_running());
    assert_eq!(ticker.period(), None);
}
