//! Backtest store
//!
//! Caches configs and runs and drives the run-status poll loop: one
//! fetch per interval, strictly sequential, resolving at the first
//! terminal status and rejecting on the first fetch failure. The poll
//! runs as a spawned task behind a stop handle so an abandoned view
//! never leaves a timer running.

use crate::api::backtest::{BacktestApi, RunBacktestRequest};
use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::stores::FlagGuard;
use crate::types::{BacktestConfig, BacktestResult, BacktestRun};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Default spacing between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

struct PollStop {
    stopped: AtomicBool,
    notify: Notify,
}

/// Cloneable stop handle for a running poll.
#[derive(Clone)]
pub struct PollHandle {
    stop: Arc<PollStop>,
}

impl PollHandle {
    /// Stop the poll. No further status fetch is scheduled afterwards;
    /// the poll task resolves with [`ClientError::Cancelled`].
    pub fn stop(&self) {
        self.stop.stopped.store(true, Ordering::SeqCst);
        self.stop.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.stopped.load(Ordering::SeqCst)
    }
}

/// A running run-status poll: a stop handle plus the awaitable outcome.
pub struct RunPoll {
    handle: PollHandle,
    task: JoinHandle<Result<BacktestRun>>,
}

impl RunPoll {
    pub fn handle(&self) -> PollHandle {
        self.handle.clone()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Wait for the poll to finish: the terminal run, the first fetch
    /// error, or [`ClientError::Cancelled`] after `stop()`.
    pub async fn join(self) -> Result<BacktestRun> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(ClientError::Cancelled),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

pub struct BacktestStore {
    api: BacktestApi,
    configs: RwLock<Vec<BacktestConfig>>,
    runs: RwLock<Vec<BacktestRun>>,
    current_run: RwLock<Option<BacktestRun>>,
    current_result: RwLock<Option<BacktestResult>>,
    loading: AtomicBool,
    polling: AtomicBool,
    error: RwLock<Option<String>>,
}

impl BacktestStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            api: BacktestApi::new(client),
            configs: RwLock::new(Vec::new()),
            runs: RwLock::new(Vec::new()),
            current_run: RwLock::new(None),
            current_result: RwLock::new(None),
            loading: AtomicBool::new(false),
            polling: AtomicBool::new(false),
            error: RwLock::new(None),
        }
    }

    pub fn configs(&self) -> Vec<BacktestConfig> {
        self.configs.read().clone()
    }

    pub fn runs(&self) -> Vec<BacktestRun> {
        self.runs.read().clone()
    }

    pub fn current_run(&self) -> Option<BacktestRun> {
        self.current_run.read().clone()
    }

    pub fn current_result(&self) -> Option<BacktestResult> {
        self.current_result.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_polling(&self) -> bool {
        self.polling.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    pub async fn fetch_configs(&self) -> Result<Vec<BacktestConfig>> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.list_configs().await {
            Ok(configs) => {
                *self.configs.write() = configs.clone();
                Ok(configs)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Create a config and prepend it to the cached list.
    pub async fn create_config(&self, config: &BacktestConfig) -> Result<BacktestConfig> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.create_config(config).await {
            Ok(created) => {
                self.configs.write().insert(0, created.clone());
                Ok(created)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Start a run; the new RUNNING run becomes current and is prepended
    /// to the runs list.
    pub async fn run_backtest(&self, request: &RunBacktestRequest) -> Result<BacktestRun> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.run(request).await {
            Ok(run) => {
                *self.current_run.write() = Some(run.clone());
                self.runs.write().insert(0, run.clone());
                Ok(run)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Poll a run until it reaches SUCCEEDED or FAILED.
    ///
    /// Fetches are strictly sequential: the next one is scheduled only
    /// after the previous response lands, `interval` apart. Every fetch
    /// updates `current_run` and replaces the matching entry in `runs`.
    /// The first fetch failure rejects the poll with no further fetch
    /// scheduled. There is no overall deadline; callers needing one
    /// layer it on top or use the returned handle.
    pub fn poll_run_status(
        self: &Arc<Self>,
        run_id: impl Into<String>,
        interval: Duration,
    ) -> RunPoll {
        let run_id = run_id.into();
        let store = Arc::clone(self);
        let stop = Arc::new(PollStop {
            stopped: AtomicBool::new(false),
            notify: Notify::new(),
        });
        let handle = PollHandle { stop: Arc::clone(&stop) };

        store.polling.store(true, Ordering::SeqCst);
        *store.error.write() = None;

        let task = tokio::spawn(async move {
            let _polling = FlagGuard::set(&store.polling);

            loop {
                if stop.stopped.load(Ordering::SeqCst) {
                    return Err(ClientError::Cancelled);
                }

                let run = match store.api.get_run(&run_id).await {
                    Ok(run) => run,
                    Err(e) => {
                        *store.error.write() = Some(e.to_string());
                        return Err(e);
                    }
                };

                *store.current_run.write() = Some(run.clone());
                {
                    let mut runs = store.runs.write();
                    if let Some(slot) = runs.iter_mut().find(|r| r.id == run.id) {
                        *slot = run.clone();
                    }
                }

                if run.status.is_terminal() {
                    tracing::info!("backtest run {} finished: {:?}", run.id, run.status);
                    return Ok(run);
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = stop.notify.notified() => return Err(ClientError::Cancelled),
                }
            }
        });

        RunPoll { handle, task }
    }

    pub async fn fetch_results(&self, run_id: &str) -> Result<BacktestResult> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.get_results(run_id).await {
            Ok(result) => {
                *self.current_result.write() = Some(result.clone());
                Ok(result)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn fetch_runs(&self, config_id: Option<&str>) -> Result<Vec<BacktestRun>> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.list_runs(config_id).await {
            Ok(runs) => {
                *self.runs.write() = runs.clone();
                Ok(runs)
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn clear_current(&self) {
        *self.current_run.write() = None;
        *self.current_result.write() = None;
    }

    fn fail<T>(&self, e: ClientError) -> Result<T> {
        *self.error.write() = Some(e.to_string());
        Err(e)
    }
}
