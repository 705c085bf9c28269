// ============================================================================
// AUTH SERVICE - decides what the UI should believe about the current user
// ============================================================================

use crate::error::ApiError;
use crate::models::{AuthResponse, UserRecord};
use crate::pocketbase::{AuthStore, RecordService};

/// The one backend call auth sync needs
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn auth_refresh(&self) -> Result<AuthResponse, ApiError>;
}

impl AuthBackend for RecordService {
    async fn auth_refresh(&self) -> Result<AuthResponse, ApiError> {
        RecordService::auth_refresh(self).await
    }
}

/// Identity to render before any network call: the cached user, if its token is still valid
pub fn initial_identity(store: &AuthStore) -> Option<UserRecord> {
    store.valid_model()
}

/// Refreshes a valid cached token. On success the store gets the new token and
/// record; on failure it is cleared. An invalid token yields `None` without a call.
///
/// A failure only clears credentials it was sent with: if the token changed
/// while the request was out, the newer credentials stay.
pub async fn refresh_identity<B: AuthBackend>(store: &AuthStore, backend: &B) -> Option<UserRecord> {
    if !store.is_valid() {
        log::info!("ℹ️ No valid cached credentials, staying signed out");
        return None;
    }

    let sent = store.token();
    log::info!("🔐 Refreshing cached credentials...");
    match backend.auth_refresh().await {
        Ok(AuthResponse { token, record }) => {
            log::info!("✅ Session refreshed for {}", record.display_name());
            store.save(token, Some(record.clone()));
            Some(record)
        }
        Err(e) if store.token() != sent => {
            log::warn!("⚠️ Session refresh failed after credentials changed, keeping them: {}", e);
            store.valid_model()
        }
        Err(e) => {
            log::warn!("⚠️ Session refresh failed, signing out: {}", e);
            store.clear();
            None
        }
    }
}
