pub mod use_auth;
pub mod use_auth_methods;

pub use use_auth::{use_auth, UseAuthHandle};
pub use use_auth_methods::{use_auth_methods, UseAuthMethodsHandle};
