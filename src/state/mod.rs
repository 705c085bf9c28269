pub mod uploads;

pub use uploads::{
    FailedUploadPolicy, FileMeta, PendingUpload, UploadAction, UploadId, UploadState, UploadStatus,
};
