pub mod auth;
pub mod uploader;

pub use auth::AuthContextProvider;
pub use uploader::{use_uploader, UploadRequest, UploaderContextProvider, UploaderHandle};
