// ============================================================================
// AUTH CONTEXT - the one place that refreshes and follows the credential store
// ============================================================================
// Mounted once under PocketBaseProvider. Components read the identity through
// use_auth, so the refresh request and the store subscription exist once no
// matter how many components ask who is signed in.
// ============================================================================

use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::UseAuthHandle;
use crate::pocketbase::use_pocket_base;
use crate::services::{initial_identity, refresh_identity};

#[derive(Properties, PartialEq)]
pub struct AuthContextProviderProps {
    pub children: Children,
}

#[function_component(AuthContextProvider)]
pub fn auth_context_provider(props: &AuthContextProviderProps) -> Html {
    let pb = use_pocket_base();
    let user = {
        let pb = pb.clone();
        use_state(move || initial_identity(pb.auth_store()))
    };

    // Refresh once on mount, then follow the store until unmount
    {
        let user = user.clone();
        use_effect_with(pb.clone(), move |pb| {
            let store = pb.auth_store().clone();

            if store.is_valid() {
                let user = user.clone();
                let store = store.clone();
                let users = pb.collection(&CONFIG.users_collection);
                wasm_bindgen_futures::spawn_local(async move {
                    user.set(refresh_identity(&store, &users).await);
                });
            }

            let subscription = store.on_change(move |_, model| user.set(model.cloned()));
            move || drop(subscription)
        });
    }

    let sign_out = {
        let pb = pb.clone();
        Callback::from(move |_| {
            log::info!("👋 Signing out");
            pb.auth_store().clear();
        })
    };

    let handle = UseAuthHandle {
        user: (*user).clone(),
        sign_out,
    };

    html! {
        <ContextProvider<UseAuthHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<UseAuthHandle>>
    }
}
