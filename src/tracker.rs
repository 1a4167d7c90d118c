// src/tracker.rs
//! Tracker facade and the background read-decode-publish loop

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::geofence::{self, GeofenceStatus};
use crate::nmea;
use crate::position::Position;
use crate::source::{LineSource, SerialLineSource};
use crate::store::PositionStore;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Pause after a transient read failure; the stream is assumed self-healing.
const READ_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Bounded wait for the worker to exit during `stop`.
const STOP_GRACE: Duration = Duration::from_secs(2);

type PositionCallback = Arc<dyn Fn(Position) + Send + Sync>;
type CallbackSlot = Arc<RwLock<Option<PositionCallback>>>;

/// GPS tracker facade: lifecycle, callback registration, and read-only
/// accessors over the position store and geofence evaluator.
///
/// Exactly one background worker runs the read loop and owns the line source;
/// accessors may be called from any number of concurrent callers. Last
/// position and history persist across stop/start cycles.
pub struct GpsTracker {
    config: TrackerConfig,
    store: Arc<PositionStore>,
    callback: CallbackSlot,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl GpsTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let store = Arc::new(PositionStore::new(config.history_capacity));
        Self {
            config,
            store,
            callback: Arc::new(RwLock::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    /// Register the position callback, replacing any previous one. The slot
    /// holds a single callback; an invocation already in flight completes
    /// with the value it captured.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        *self.callback.write().unwrap() = Some(Arc::new(callback));
    }

    pub fn clear_callback(&self) {
        *self.callback.write().unwrap() = None;
    }

    /// Open the configured serial source and start the read loop. A source
    /// open failure is returned synchronously and the loop does not start.
    /// No-op when already running.
    pub async fn start(&self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        let source =
            SerialLineSource::open(&self.config.address, self.config.baud_rate).await?;
        self.spawn_worker(source);
        Ok(())
    }

    /// Start the read loop over a caller-supplied line source. No-op when
    /// already running.
    pub fn start_with_source<S>(&self, source: S) -> Result<()>
    where
        S: LineSource + Send + 'static,
    {
        if self.is_running() {
            return Ok(());
        }
        self.spawn_worker(source);
        Ok(())
    }

    fn spawn_worker<S>(&self, source: S)
    where
        S: LineSource + Send + 'static,
    {
        let mut worker = self.worker.lock().unwrap();
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        self.running.store(true, Ordering::Relaxed);
        let handle = tokio::spawn(run_loop(
            source,
            self.config.read_timeout(),
            Arc::clone(&self.store),
            Arc::clone(&self.callback),
            Arc::clone(&self.running),
        ));
        *worker = Some(handle);
    }

    /// Signal the worker to stop and wait up to a bounded grace period for it
    /// to exit. May return before the worker has fully exited; the worker
    /// releases the source on its own way out. No-op when idle.
    pub async fn stop(&self) {
        let handle = self.worker.lock().unwrap().take();
        let Some(handle) = handle else {
            return;
        };

        self.running.store(false, Ordering::Relaxed);
        if tokio::time::timeout(STOP_GRACE, handle).await.is_err() {
            log::warn!("worker did not exit within {:?}; detaching", STOP_GRACE);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self
                .worker
                .lock()
                .unwrap()
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    /// Most recent recorded position, if any.
    pub fn last(&self) -> Option<Position> {
        self.store.last()
    }

    /// Ordered copy of the history, oldest to newest.
    pub fn snapshot(&self) -> Vec<Position> {
        self.store.snapshot()
    }

    /// Test the last position against a circular geofence. `Unknown` when no
    /// position has been recorded yet.
    pub fn geofence_circle(
        &self,
        center_lat: f64,
        center_lon: f64,
        radius_m: f64,
    ) -> GeofenceStatus {
        geofence::circle_contains(self.last().as_ref(), center_lat, center_lon, radius_m)
    }

    /// Write the current history snapshot to a CSV file.
    pub fn save_history_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::export::save_history_csv(path, &self.snapshot())
    }
}

/// Continuous read-decode-publish loop. Malformed input and transient read
/// failures are logged and contained; only the stop flag ends the loop.
async fn run_loop<S>(
    mut source: S,
    read_timeout: Duration,
    store: Arc<PositionStore>,
    callback: CallbackSlot,
    running: Arc<AtomicBool>,
) where
    S: LineSource + Send + 'static,
{
    log::debug!("tracking loop started");

    while running.load(Ordering::Relaxed) {
        match source.read_line(read_timeout).await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match nmea::decode(line) {
                    Ok(Some(position)) => {
                        store.record(position);
                        invoke_callback(&callback, position);
                    }
                    Ok(None) => {}
                    Err(e) => log::debug!("rejected sentence: {}", e),
                }
            }
            // Timeout or no complete line yet; loop around and re-check the
            // stop flag.
            Ok(None) => {}
            Err(e) => {
                log::warn!("{}; retrying", e);
                tokio::time::sleep(READ_RETRY_DELAY).await;
            }
        }
    }

    source.close().await;
    log::debug!("tracking loop exited");
}

/// Invoke the registered callback, if any, isolating panics so one bad sink
/// cannot stop ingestion. Store state already written is unaffected.
fn invoke_callback(slot: &CallbackSlot, position: Position) {
    let callback = slot.read().unwrap().clone();
    let Some(callback) = callback else {
        return;
    };

    let outcome =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| callback(position)));
    if let Err(panic) = outcome {
        let msg = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        log::error!("{}", TrackerError::Callback(msg));
    }
}
