use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use pricewatch_logging::{watch_debug, watch_info};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::{
    ChannelEventSink, ClientSettings, EngineEvent, EventSink, FetchError, ReqwestScheduleClient,
    RequestId, ScheduleClient, TaskRequest, Ticker,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build schedule client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        task: TaskRequest,
    },
    Cancel {
        request_id: RequestId,
    },
    StartTimer {
        period: Duration,
    },
    StopTimer,
    Shutdown,
}

/// Command side of the engine thread. Cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine thread.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<(Self, EngineEvents), EngineError> {
        let client = ReqwestScheduleClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    /// Spawn the engine thread around an arbitrary schedule client.
    pub fn with_client(
        client: Arc<dyn ScheduleClient>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(runtime, client, cmd_rx, event_tx));

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    /// Issue a schedule request. A request still in flight is cancelled first.
    pub fn fetch(&self, request_id: RequestId, task: TaskRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { request_id, task });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn start_timer(&self, period: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartTimer { period });
    }

    pub fn stop_timer(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopTimer);
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine thread has exited.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_engine(
    runtime: Runtime,
    client: Arc<dyn ScheduleClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
    let mut ticker = Ticker::new(runtime.handle().clone(), sink.clone());
    let mut in_flight: Option<(RequestId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Fetch { request_id, task } => {
                if let Some((stale, token)) = in_flight.take() {
                    watch_debug!("Request {} replaced by {}", stale, request_id);
                    token.cancel();
                }
                let token = CancellationToken::new();
                in_flight = Some((request_id, token.clone()));
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            watch_debug!("Request {} cancelled", request_id);
                        }
                        result = client.fetch_schedule(&task) => {
                            sink.emit(EngineEvent::ScheduleFetched { request_id, result });
                        }
                    }
                });
            }
            EngineCommand::Cancel { request_id } => {
                if in_flight.as_ref().is_some_and(|(id, _)| *id == request_id) {
                    if let Some((_, token)) = in_flight.take() {
                        token.cancel();
                    }
                }
            }
            EngineCommand::StartTimer { period } => ticker.start(period),
            EngineCommand::StopTimer => ticker.stop(),
            EngineCommand::Shutdown => break,
        }
    }

    ticker.stop();
    if let Some((_, token)) = in_flight.take() {
        token.cancel();
    }
    runtime.shutdown_background();
    watch_info!("Engine thread stopped");
}
