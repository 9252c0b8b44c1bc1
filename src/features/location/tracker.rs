use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use crate::core::config::LocationConfig;
use crate::features::location::model::{LocationSample, Position, PositionError};

/// Continuous position sampler: the seam to the platform's geolocation
/// facility. Implementations block in `next_position` until a fresh fix is
/// available (high-accuracy mode, no cached positions).
#[async_trait]
pub trait PositionSource: Send + 'static {
    /// `None` means the underlying watcher has ended and no further samples
    /// will arrive.
    async fn next_position(&mut self) -> Option<Result<Position, PositionError>>;
}

/// Adapter turning any stream of position results into a `PositionSource`.
pub struct StreamPositionSource {
    inner: BoxStream<'static, Result<Position, PositionError>>,
}

impl StreamPositionSource {
    pub fn new(
        stream: impl futures::Stream<Item = Result<Position, PositionError>> + Send + 'static,
    ) -> Self {
        Self {
            inner: stream.boxed(),
        }
    }
}

#[async_trait]
impl PositionSource for StreamPositionSource {
    async fn next_position(&mut self) -> Option<Result<Position, PositionError>> {
        self.inner.next().await
    }
}

/// Observable tracker state. The sample is always present: before the first
/// fix it holds the configured fallback coordinate, and after a failure it
/// keeps the last-known value, so the map always has something to render.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    pub sample: LocationSample,
    pub error: Option<PositionError>,
    pub acquiring: bool,
    pub manual_mode: bool,
}

/// Wraps continuous geolocation watching with manual-override capability.
///
/// At most one watch task is live at a time: `start` cancels the previous
/// task before spawning a new one, and dropping the tracker aborts it.
pub struct LocationTracker {
    state: Arc<watch::Sender<LocationState>>,
    watch_task: Mutex<Option<JoinHandle<()>>>,
    acquire_timeout: Duration,
}

impl LocationTracker {
    pub fn new(config: &LocationConfig) -> Self {
        let initial = LocationState {
            sample: LocationSample::fallback(config.default_latitude, config.default_longitude),
            error: None,
            acquiring: false,
            manual_mode: false,
        };
        let (state, _) = watch::channel(initial);

        Self {
            state: Arc::new(state),
            watch_task: Mutex::new(None),
            acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
        }
    }

    pub fn current(&self) -> LocationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state.subscribe()
    }

    /// Tracker state as an async stream, for consumers that re-render on
    /// every change.
    pub fn updates(&self) -> WatchStream<LocationState> {
        WatchStream::new(self.state.subscribe())
    }

    /// Begin (or restart) continuous position sampling. Any previous
    /// subscription is cancelled first so no duplicate callbacks survive.
    pub fn start<S: PositionSource>(&self, source: S) {
        self.cancel_watch();

        self.state.send_modify(|s| {
            s.acquiring = true;
            s.error = None;
        });

        let state = Arc::clone(&self.state);
        let acquire_timeout = self.acquire_timeout;

        let handle = tokio::spawn(async move {
            let mut source = source;
            loop {
                match tokio::time::timeout(acquire_timeout, source.next_position()).await {
                    Ok(Some(Ok(position))) => {
                        state.send_modify(|s| {
                            s.sample = LocationSample::automatic(position);
                            s.error = None;
                            s.acquiring = false;
                        });
                    }
                    Ok(Some(Err(error))) => {
                        tracing::warn!("Location error: {}", error);
                        let fatal = error.is_fatal();
                        state.send_modify(|s| {
                            s.error = Some(error);
                            s.acquiring = false;
                        });
                        if fatal {
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::debug!("Position source ended");
                        state.send_modify(|s| s.acquiring = false);
                        break;
                    }
                    Err(_) => {
                        tracing::warn!("Location acquisition timed out");
                        state.send_modify(|s| {
                            s.error = Some(PositionError::Timeout);
                            s.acquiring = false;
                        });
                    }
                }
            }
        });

        *self.watch_task.lock().expect("watch task lock poisoned") = Some(handle);
    }

    /// Stop sampling. Mandatory on component teardown; also runs on drop.
    pub fn stop(&self) {
        self.cancel_watch();
        self.state.send_modify(|s| s.acquiring = false);
    }

    pub fn enter_manual(&self) {
        self.state.send_modify(|s| s.manual_mode = true);
    }

    pub fn cancel_manual(&self) {
        self.state.send_modify(|s| s.manual_mode = false);
    }

    /// One-shot manual override from a map click. Only meaningful while
    /// manual mode is active; automatic tracking resumes afterwards.
    /// Returns whether the click was applied.
    pub fn apply_map_click(&self, latitude: f64, longitude: f64) -> bool {
        self.apply_override(latitude, longitude)
    }

    /// Dragging the self-marker behaves identically to a map click.
    pub fn apply_marker_drag(&self, latitude: f64, longitude: f64) -> bool {
        self.apply_override(latitude, longitude)
    }

    fn apply_override(&self, latitude: f64, longitude: f64) -> bool {
        if !self.state.borrow().manual_mode {
            return false;
        }
        self.state.send_modify(|s| {
            s.sample = LocationSample::manual(latitude, longitude);
            s.error = None;
            s.manual_mode = false;
        });
        true
    }

    fn cancel_watch(&self) {
        if let Some(handle) = self
            .watch_task
            .lock()
            .expect("watch task lock poisoned")
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for LocationTracker {
    fn drop(&mut self) {
        self.cancel_watch();
    }
}
