use std::sync::Arc;
use std::time::Duration;

use pricewatch_logging::{watch_debug, watch_info};
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink};

/// A single cancellable repeating timer.
///
/// Each tick emits [`EngineEvent::TimerFired`]. The first tick comes one full
/// period after `start`. Starting again with another period replaces the running
/// timer; there is never more than one.
pub struct Ticker {
    runtime: Handle,
    sink: Arc<dyn EventSink>,
    running: Option<(Duration, CancellationToken)>,
}

impl Ticker {
    pub fn new(runtime: Handle, sink: Arc<dyn EventSink>) -> Self {
        Self {
            runtime,
            sink,
            running: None,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.running.as_ref().map(|(period, _)| *period)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start ticking every `period`. A no-op if already ticking at that period.
    pub fn start(&mut self, period: Duration) {
        if self.period() == Some(period) {
            return;
        }
        self.stop();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => sink.emit(EngineEvent::TimerFired),
                }
            }
        });
        watch_info!("Poll timer started at {:?}", period);
        self.running = Some((period, token));
    }

    /// Stop ticking. Safe to call when nothing runs.
    pub fn stop(&mut self) {
        if let Some((period, token)) = self.running.take() {
            token.cancel();
            watch_debug!("Poll timer at {:?} stopped", period);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
