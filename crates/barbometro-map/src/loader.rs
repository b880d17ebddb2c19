//! Single-flight guard around loading the map widget's script.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::Url;

use crate::error::MapLoadFailure;

const SCRIPT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// URL of the map widget script for `api_key`, with the places library.
///
/// # Errors
///
/// Returns [`MapLoadFailure::MissingKey`] for a blank key.
pub fn script_url(api_key: &str) -> Result<String, MapLoadFailure> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(MapLoadFailure::MissingKey(
            "API key is missing from server response".to_string(),
        ));
    }
    Url::parse_with_params(SCRIPT_BASE_URL, &[("key", key), ("libraries", "places")])
        .map(String::from)
        .map_err(|e| MapLoadFailure::Script(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(MapLoadFailure),
}

enum Begin {
    Ready,
    Load,
    Wait,
}

/// Owns the "is the script loaded / loading" flag.
///
/// Once loaded, the loader stays loaded for its whole lifetime. A failed load
/// may be attempted again by the next caller.
#[derive(Debug)]
pub struct ScriptLoader {
    state: Mutex<LoadState>,
    poll_interval: Duration,
    timeout: Duration,
}

impl ScriptLoader {
    #[must_use]
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            state: Mutex::new(LoadState::Idle),
            poll_interval,
            timeout,
        }
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.lock().clone()
    }

    /// Make sure the script is loaded, running `load` only if nobody else has
    /// loaded it or is loading it right now.
    ///
    /// A caller that finds a load in flight polls every `poll_interval` until
    /// it completes.
    ///
    /// # Errors
    ///
    /// - [`MapLoadFailure::Timeout`] if an in-flight load outlasts `timeout`.
    /// - Whatever `load` (ours or the in-flight one) failed with.
    pub async fn ensure_loaded<F, Fut>(&self, load: F) -> Result<(), MapLoadFailure>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), MapLoadFailure>>,
    {
        match self.begin() {
            Begin::Ready => Ok(()),
            Begin::Wait => self.wait_for_in_flight().await,
            Begin::Load => {
                let mut in_flight = InFlight {
                    loader: self,
                    settled: false,
                };
                let result = load().await;
                in_flight.settle(&result);
                result
            }
        }
    }

    fn begin(&self) -> Begin {
        let mut state = self.lock();
        match *state {
            LoadState::Loaded => Begin::Ready,
            LoadState::Loading => Begin::Wait,
            LoadState::Idle | LoadState::Failed(_) => {
                *state = LoadState::Loading;
                tracing::debug!("loading map script");
                Begin::Load
            }
        }
    }

    async fn wait_for_in_flight(&self) -> Result<(), MapLoadFailure> {
        let started = tokio::time::Instant::now();
        loop {
            tokio::time::sleep(self.poll_interval).await;

            match self.state() {
                LoadState::Loaded => return Ok(()),
                LoadState::Failed(e) => return Err(e),
                LoadState::Idle => {
                    return Err(MapLoadFailure::Script(
                        "map script load was abandoned".to_string(),
                    ))
                }
                LoadState::Loading => {
                    let waited = started.elapsed();
                    if waited >= self.timeout {
                        let waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX);
                        tracing::warn!(waited_ms, "timed out waiting for map script");
                        return Err(MapLoadFailure::Timeout { waited_ms });
                    }
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets the state to idle if the loading future is dropped mid-flight.
struct InFlight<'a> {
    loader: &'a ScriptLoader,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(&mut self, result: &Result<(), MapLoadFailure>) {
        let next = match result {
            Ok(()) => LoadState::Loaded,
            Err(e) => {
                tracing::warn!(error = %e, "map script failed to load");
                LoadState::Failed(e.clone())
            }
        };
        *self.loader.lock() = next;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.loader.lock() = LoadState::Idle;
        }
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
