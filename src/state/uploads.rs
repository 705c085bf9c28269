// ============================================================================
// UPLOAD STATE - pure reducer for in-flight uploads
// ============================================================================
// Network work lives in context::uploader; this module only folds
// UploadAction events into UploadState.
// ============================================================================

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use uuid::Uuid;
use yew::Reducible;

/// Unique id generated for every upload request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What we know about the local file being sent
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    InFlight,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub id: UploadId,
    pub file: FileMeta,
    pub post_id: String,
    /// Percentage, 0..=100
    pub progress: u8,
    pub status: UploadStatus,
}

impl PendingUpload {
    pub fn new(file: FileMeta, post_id: impl Into<String>) -> Self {
        Self {
            id: UploadId::new(),
            file,
            post_id: post_id.into(),
            progress: 0,
            status: UploadStatus::InFlight,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, UploadStatus::Failed { .. })
    }
}

/// What happens to an upload the server (or the network) rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailedUploadPolicy {
    /// Keep the entry, marked as failed, until the user dismisses it
    #[default]
    Retain,
    /// Drop the entry as soon as it fails
    Evict,
}

impl FromStr for FailedUploadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "evict" => Ok(Self::Evict),
            other => Err(format!("unknown failed upload policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadAction {
    Started(PendingUpload),
    /// `progress` is the transferred fraction (0.0..=1.0) when the transport knows it
    Progress { id: UploadId, progress: Option<f64> },
    Completed { id: UploadId },
    Failed { id: UploadId, reason: String },
    Dismissed { id: UploadId },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadState {
    pub uploads: Vec<PendingUpload>,
    pub failure_policy: FailedUploadPolicy,
}

impl UploadState {
    pub fn new(failure_policy: FailedUploadPolicy) -> Self {
        Self {
            uploads: Vec::new(),
            failure_policy,
        }
    }

    pub fn get(&self, id: UploadId) -> Option<&PendingUpload> {
        self.uploads.iter().find(|u| u.id == id)
    }

    pub fn in_flight(&self) -> usize {
        self.uploads.iter().filter(|u| !u.is_failed()).count()
    }

    pub fn apply(&mut self, action: UploadAction) {
        match action {
            UploadAction::Started(upload) => {
                if self.get(upload.id).is_some() {
                    log::warn!("⚠️ Upload {} already tracked, ignoring", upload.id);
                    return;
                }
                self.uploads.push(upload);
            }
            UploadAction::Progress { id, progress } => {
                if let Some(upload) = self.uploads.iter_mut().find(|u| u.id == id) {
                    if let Some(fraction) = progress {
                        upload.progress = to_percent(fraction);
                    }
                }
            }
            UploadAction::Completed { id } | UploadAction::Dismissed { id } => {
                self.uploads.retain(|u| u.id != id);
            }
            UploadAction::Failed { id, reason } => match self.failure_policy {
                FailedUploadPolicy::Retain => {
                    if let Some(upload) = self.uploads.iter_mut().find(|u| u.id == id) {
                        upload.status = UploadStatus::Failed { reason };
                    }
                }
                FailedUploadPolicy::Evict => self.uploads.retain(|u| u.id != id),
            },
        }
    }
}

impl Reducible for UploadState {
    type Action = UploadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

fn to_percent(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}
