use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use futures_util::StreamExt;
use rephrase_logging::{rephrase_debug, rephrase_error, rephrase_info};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::{ApiError, ClientSettings, EngineEvent, RephraseApi, ReqwestApi};

/// How long pending cancel calls may run after the handle is dropped.
const CANCEL_GRACE: Duration = Duration::from_secs(2);

enum EngineCommand {
    StartJob { text: String },
    OpenStream { session_id: String },
    CloseStream { session_id: String },
    CancelJob { session_id: String },
    CheckHealth,
}

/// The one subscription the engine keeps open.
struct ActiveStream {
    session_id: String,
    token: CancellationToken,
}

/// Runs backend calls on a background tokio runtime.
///
/// Commands are executed in the order they are sent. Results come back through
/// [`EngineHandle::try_recv`]; stream events keep their transport order.
/// Dropping the handle closes any open stream and blocks until cancel calls
/// already sent have finished, or their grace period ran out.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let api = ReqwestApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn RephraseApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    rephrase_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut active: Option<ActiveStream> = None;
            let cancels = TaskTracker::new();
            while let Ok(command) = cmd_rx.recv() {
                dispatch(&runtime, &api, &mut active, &cancels, command, &event_tx);
            }
            if let Some(stream) = active.take() {
                stream.token.cancel();
            }
            cancels.close();
            runtime.block_on(async {
                if tokio::time::timeout(CANCEL_GRACE, cancels.wait()).await.is_err() {
                    rephrase_debug!("Gave up waiting for {} cancel call(s)", cancels.len());
                }
            });
        });

        Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    pub fn start_job(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartJob { text: text.into() });
    }

    pub fn open_stream(&self, session_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::OpenStream {
            session_id: session_id.into(),
        });
    }

    pub fn close_stream(&self, session_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::CloseStream {
            session_id: session_id.into(),
        });
    }

    pub fn cancel_job(&self, session_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::CancelJob {
            session_id: session_id.into(),
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        // The worker leaves its command loop once every sender is gone.
        let (closed_tx, _) = mpsc::channel();
        drop(std::mem::replace(&mut self.cmd_tx, closed_tx));
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                rephrase_error!("Engine thread panicked during shutdown");
            }
        }
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    api: &Arc<dyn RephraseApi>,
    active: &mut Option<ActiveStream>,
    cancels: &TaskTracker,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let api = Arc::clone(api);
    let event_tx = event_tx.clone();
    match command {
        EngineCommand::StartJob { text } => {
            runtime.spawn(async move {
                let event = match api.start_job(&text).await {
                    Ok(session_id) => EngineEvent::JobStarted { session_id },
                    Err(error) => EngineEvent::JobStartFailed { error },
                };
                let _ = event_tx.send(event);
            });
        }
        EngineCommand::OpenStream { session_id } => {
            if let Some(previous) = active.take() {
                rephrase_debug!("Replacing stream for session {}", previous.session_id);
                previous.token.cancel();
            }
            let token = CancellationToken::new();
            *active = Some(ActiveStream {
                session_id: session_id.clone(),
                token: token.clone(),
            });
            runtime.spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        rephrase_debug!("Stream for session {} closed locally", session_id);
                    }
                    _ = pump_stream(api.as_ref(), &session_id, &event_tx) => {}
                }
            });
        }
        EngineCommand::CloseStream { session_id } => {
            if active
                .as_ref()
                .is_some_and(|stream| stream.session_id == session_id)
            {
                if let Some(stream) = active.take() {
                    stream.token.cancel();
                }
            }
        }
        EngineCommand::CancelJob { session_id } => {
            cancels.spawn_on(
                async move {
                    let result = api.cancel_job(&session_id).await;
                    let _ = event_tx.send(EngineEvent::CancelCompleted { session_id, result });
                },
                runtime.handle(),
            );
        }
        EngineCommand::CheckHealth => {
            runtime.spawn(async move {
                let reachable = api.check_health().await.is_ok();
                let _ = event_tx.send(EngineEvent::Health { reachable });
            });
        }
    }
}

/// Forwards events until a terminal one, an error, or the end of the stream.
async fn pump_stream(
    api: &dyn RephraseApi,
    session_id: &str,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let mut events = match api.open_stream(session_id).await {
        Ok(events) => events,
        Err(error) => {
            let _ = event_tx.send(EngineEvent::StreamFailed {
                session_id: session_id.to_owned(),
                error,
            });
            return;
        }
    };
    rephrase_info!("Stream opened for session {}", session_id);

    while let Some(item) = events.next().await {
        match item {
            Ok(event) => {
                let terminal = event.is_terminal();
                let _ = event_tx.send(EngineEvent::Stream {
                    session_id: session_id.to_owned(),
                    event,
                });
                if terminal {
                    return;
                }
            }
            Err(error) => {
                let _ = event_tx.send(EngineEvent::StreamFailed {
                    session_id: session_id.to_owned(),
                    error,
                });
                return;
            }
        }
    }

    let _ = event_tx.send(EngineEvent::StreamFailed {
        session_id: session_id.to_owned(),
        error: ApiError::StreamEnded,
    });
}
