use yew::prelude::*;

use super::{Nav, PostComposer, UploadList};
use crate::context::{AuthContextProvider, UploaderContextProvider};
use crate::pocketbase::PocketBaseProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <PocketBaseProvider>
            <AuthContextProvider>
                <UploaderContextProvider>
                    <div class="app">
                        <Nav />
                        <main class="app-main">
                            <PostComposer />
                            <UploadList />
                        </main>
                    </div>
                </UploaderContextProvider>
            </AuthContextProvider>
        </PocketBaseProvider>
    }
}
