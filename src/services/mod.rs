pub mod auth_service;
pub mod post_service;
pub mod upload_service;

pub use auth_service::{initial_identity, refresh_identity, AuthBackend};
pub use post_service::{attach_file, create_post};
pub use upload_service::{create_file_record, NewFile};
