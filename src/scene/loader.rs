//! Background asset loading.
//!
//! Each request runs on its own named thread and reports back over a
//! channel. The main loop calls [`AssetLoader::poll`] once per frame; it
//! never blocks.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use super::environment::EnvironmentMap;
use super::model::Model;
use crate::error::ViewerError;

/// A finished load, successful or not.
#[derive(Debug)]
pub enum LoadEvent {
    /// Model load finished.
    Model {
        /// File that was requested.
        path: PathBuf,
        /// Parsed model or the reason it failed.
        result: Result<Model, ViewerError>,
    },
    /// Environment map load finished.
    Environment {
        /// File that was requested.
        path: PathBuf,
        /// Decoded map or the reason it failed.
        result: Result<EnvironmentMap, ViewerError>,
    },
}

impl LoadEvent {
    /// Path the load was requested for.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Model { path, .. } | Self::Environment { path, .. } => path,
        }
    }
}

/// Request ticket paired with its finished event.
struct Completed {
    ticket: u64,
    event: LoadEvent,
}

/// Spawns load threads and collects their results.
pub struct AssetLoader {
    tx: mpsc::Sender<Completed>,
    rx: mpsc::Receiver<Completed>,
    next_ticket: u64,
    latest_model: Option<u64>,
    latest_environment: Option<u64>,
    pending: usize,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader {
    /// Create a loader with no outstanding requests.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_ticket: 0,
            latest_model: None,
            latest_environment: None,
            pending: 0,
        }
    }

    /// Start loading a model. A later request supersedes this one: its
    /// result is dropped when it arrives.
    ///
    /// # Errors
    ///
    /// [`ViewerError::ThreadSpawn`] if the worker thread cannot start.
    pub fn request_model(&mut self, path: impl Into<PathBuf>) -> Result<(), ViewerError> {
        let path = path.into();
        let ticket = self.spawn("model-loader", path, |path| LoadEvent::Model {
            result: Model::load(&path).map_err(ViewerError::from),
            path,
        })?;
        self.latest_model = Some(ticket);
        Ok(())
    }

    /// Start loading an environment map. Supersedes earlier requests.
    ///
    /// # Errors
    ///
    /// [`ViewerError::ThreadSpawn`] if the worker thread cannot start.
    pub fn request_environment(
        &mut self,
        path: impl Into<PathBuf>,
    ) -> Result<(), ViewerError> {
        let path = path.into();
        let ticket = self.spawn("environment-loader", path, |path| {
            LoadEvent::Environment {
                result: EnvironmentMap::load(&path).map_err(ViewerError::from),
                path,
            }
        })?;
        self.latest_environment = Some(ticket);
        Ok(())
    }

    fn spawn<F>(&mut self, name: &str, path: PathBuf, job: F) -> Result<u64, ViewerError>
    where
        F: FnOnce(PathBuf) -> LoadEvent + Send + 'static,
    {
        let ticket = self.next_ticket;
        let tx = self.tx.clone();
        log::debug!("{name}: requesting {}", path.display());
        let _handle = std::thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                let event = job(path);
                // Receiver gone means the viewer shut down.
                let _ = tx.send(Completed { ticket, event });
            })
            .map_err(ViewerError::ThreadSpawn)?;
        self.next_ticket += 1;
        self.pending += 1;
        Ok(ticket)
    }

    /// Number of requests that have not reported back yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Drain every finished load without blocking. Superseded results are
    /// discarded.
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Ok(done) = self.rx.try_recv() {
            if let Some(event) = self.accept(done) {
                events.push(event);
            }
        }
        events
    }

    /// Block until the next current load finishes or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadEvent> {
        let deadline = web_time::Instant::now() + timeout;
        loop {
            let remaining =
                deadline.saturating_duration_since(web_time::Instant::now());
            let done = self.rx.recv_timeout(remaining).ok()?;
            if let Some(event) = self.accept(done) {
                return Some(event);
            }
        }
    }

    fn accept(&mut self, done: Completed) -> Option<LoadEvent> {
        self.pending = self.pending.saturating_sub(1);
        let latest = match done.event {
            LoadEvent::Model { .. } => self.latest_model,
            LoadEvent::Environment { .. } => self.latest_environment,
        };
        if latest == Some(done.ticket) {
            Some(done.event)
        } else {
            log::debug!("dropping superseded load of {}", done.event.path().display());
            None
        }
    }
}
