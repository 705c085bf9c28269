// ============================================================================
// USE AUTH HOOK - current identity as published by AuthContextProvider
// ============================================================================

use yew::prelude::*;

use crate::models::UserRecord;

#[derive(Clone, PartialEq)]
pub struct UseAuthHandle {
    pub user: Option<UserRecord>,
    pub sign_out: Callback<()>,
}

impl UseAuthHandle {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Reads the shared identity; never issues requests of its own
#[hook]
pub fn use_auth() -> UseAuthHandle {
    use_context::<UseAuthHandle>().expect("use_auth must be called under an AuthContextProvider")
}
