pub mod auth;
pub mod post;
pub mod stored_file;

pub use auth::{AuthMethods, AuthResponse, UserRecord};
pub use post::{NewPost, Post};
pub use stored_file::StoredFile;
