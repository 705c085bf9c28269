use yew::prelude::*;

use crate::config::CONFIG;
use crate::models::AuthMethods;
use crate::pocketbase::use_pocket_base;

#[derive(Clone, PartialEq)]
pub struct UseAuthMethodsHandle {
    pub methods: Option<AuthMethods>,
    pub loading: bool,
}

impl UseAuthMethodsHandle {
    /// False until the server says otherwise
    pub fn username_password_enabled(&self) -> bool {
        self.methods
            .as_ref()
            .map(|m| m.username_password)
            .unwrap_or(false)
    }
}

#[hook]
pub fn use_auth_methods() -> UseAuthMethodsHandle {
    let pb = use_pocket_base();
    let methods = use_state(|| None::<AuthMethods>);
    let loading = use_state(|| true);

    {
        let methods = methods.clone();
        let loading = loading.clone();
        use_effect_with(pb, move |pb| {
            let users = pb.collection(&CONFIG.users_collection);
            wasm_bindgen_futures::spawn_local(async move {
                match users.list_auth_methods().await {
                    Ok(loaded) => {
                        log::info!(
                            "✅ Auth methods loaded (username/password: {})",
                            loaded.username_password
                        );
                        methods.set(Some(loaded));
                    }
                    Err(e) => {
                        log::error!("❌ Could not load auth methods: {}", e);
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    UseAuthMethodsHandle {
        methods: (*methods).clone(),
        loading: *loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_false_while_unknown() {
        let handle = UseAuthMethodsHandle {
            methods: None,
            loading: true,
        };
        assert!(!handle.username_password_enabled());
    }

    #[test]
    fn test_flag_follows_server() {
        let handle = UseAuthMethodsHandle {
            methods: Some(AuthMethods {
                username_password: true,
                email_password: true,
            }),
            loading: false,
        };
        assert!(handle.username_password_enabled());
    }
}
