// ============================================================================
// POCKETBASE CONTEXT - one client handle shared by the whole view tree
// ============================================================================

use yew::prelude::*;

use super::client::PocketBase;
use crate::config::CONFIG;

#[derive(Properties, PartialEq)]
pub struct PocketBaseProviderProps {
    #[prop_or_default]
    pub client: Option<PocketBase>,
    pub children: Children,
}

/// Owns the client handle and keeps cross-tab credential sync alive while mounted
#[function_component(PocketBaseProvider)]
pub fn pocket_base_provider(props: &PocketBaseProviderProps) -> Html {
    let client = {
        let injected = props.client.clone();
        use_state(move || {
            injected.unwrap_or_else(|| PocketBase::new(&CONFIG.pocketbase_url, &CONFIG.auth_storage_key))
        })
    };

    use_effect_with((*client).clone(), |client| {
        let watch = client.auth_store().watch_other_tabs();
        if watch.is_some() {
            log::info!("👀 Following credential changes from other tabs");
        }
        move || drop(watch)
    });

    html! {
        <ContextProvider<PocketBase> context={(*client).clone()}>
            {props.children.clone()}
        </ContextProvider<PocketBase>>
    }
}

#[hook]
pub fn use_pocket_base() -> PocketBase {
    use_context::<PocketBase>().expect("use_pocket_base must be called under a PocketBaseProvider")
}
