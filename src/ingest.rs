//! Add-document lifecycle.
//!
//! Independent of the search session: no invariant couples the two state
//! machines. Uploads carry a batch of exactly one document. On success the
//! form's title and text are cleared (the source selection is kept) and the
//! status falls back to Idle after a fixed delay.
//!
//! Every explicit transition bumps an epoch counter, and the scheduled
//! auto-reset is bound to the epoch at which it was scheduled. A reset whose
//! epoch is no longer current is a no-op, so a stale timer can never clobber
//! the status of a newer upload.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ApiClient;
use crate::models::{DocSource, Document};

/// Delay before a successful upload's status falls back to Idle.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(3);

/// Lifecycle of the add-document form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

/// The add-document form fields.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    pub text: String,
    pub source: DocSource,
    pub url: String,
}

/// Observable upload state.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub status: UploadStatus,
    pub form: UploadForm,
    epoch: u64,
}

impl UploadState {
    /// Begin an upload from the current form. `None` with no state change
    /// unless both title and text are non-empty.
    pub fn begin(&mut self) -> Option<(u64, Document)> {
        if self.form.title.is_empty() || self.form.text.is_empty() {
            return None;
        }
        self.epoch += 1;
        self.status = UploadStatus::Uploading;
        Some((
            self.epoch,
            Document {
                title: self.form.title.clone(),
                text: self.form.text.clone(),
                source: self.form.source,
                url: self.form.url.clone(),
            },
        ))
    }

    /// Apply a successful completion for the upload begun at `epoch`.
    /// Clears title and text, keeps the source selection, and returns the
    /// epoch the delayed reset must be bound to. Stale completions are
    /// discarded.
    pub fn complete(&mut self, epoch: u64) -> Option<u64> {
        if epoch != self.epoch {
            return None;
        }
        self.epoch += 1;
        self.status = UploadStatus::Success;
        self.form.title.clear();
        self.form.text.clear();
        Some(self.epoch)
    }

    /// Apply a failed completion for the upload begun at `epoch`. The form
    /// contents are preserved so the user can retry without retyping.
    pub fn fail(&mut self, epoch: u64) {
        if epoch != self.epoch {
            return;
        }
        self.epoch += 1;
        self.status = UploadStatus::Error;
    }

    /// Apply the delayed auto-reset scheduled at `epoch`. A no-op when any
    /// explicit transition has happened since.
    pub fn reset(&mut self, epoch: u64) {
        if epoch != self.epoch {
            debug!("discarding stale upload reset (epoch {epoch} < {})", self.epoch);
            return;
        }
        self.status = UploadStatus::Idle;
    }
}

/// Drives document uploads and owns the shared upload state.
#[derive(Clone)]
pub struct Ingestor {
    state: Arc<Mutex<UploadState>>,
    client: ApiClient,
    reset_delay: Duration,
    on_success: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Ingestor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(UploadState::default())),
            client,
            reset_delay: SUCCESS_RESET_DELAY,
            on_success: None,
        }
    }

    /// Override the success auto-reset delay.
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Register a listener invoked after each successful upload.
    pub fn with_on_success(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(listener));
        self
    }

    /// Mutate the form fields in place.
    pub fn set_form(&self, mutate: impl FnOnce(&mut UploadForm)) {
        mutate(&mut self.lock().form);
    }

    /// Submit the current form. No-op (returns `None`) unless both title
    /// and text are non-empty. Otherwise issues exactly one request and
    /// returns its task handle so callers may await completion.
    pub fn submit(&self) -> Option<JoinHandle<()>> {
        let (epoch, document) = self.lock().begin()?;
        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let reset_delay = self.reset_delay;
        let on_success = self.on_success.clone();

        Some(tokio::spawn(async move {
            match client.upload(vec![document]).await {
                Ok(()) => {
                    let reset_epoch = lock(&state).complete(epoch);
                    let Some(reset_epoch) = reset_epoch else {
                        return;
                    };
                    if let Some(listener) = &on_success {
                        listener();
                    }
                    tokio::spawn(async move {
                        tokio::time::sleep(reset_delay).await;
                        lock(&state).reset(reset_epoch);
                    });
                }
                Err(error) => {
                    debug!("upload failed: {error}");
                    lock(&state).fail(epoch);
                }
            }
        }))
    }

    /// Snapshot of the current upload state.
    pub fn snapshot(&self) -> UploadState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, UploadState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<UploadState>) -> MutexGuard<'_, UploadState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
