// ============================================================================
// POST COMPOSER - creates a post, then hands each picked file to the uploader
// ============================================================================

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::context::{use_uploader, UploadRequest};
use crate::error::ApiError;
use crate::hooks::use_auth;
use crate::models::{NewPost, StoredFile};
use crate::pocketbase::{use_pocket_base, PocketBase};
use crate::services::{attach_file, create_post, NewFile};

#[function_component(PostComposer)]
pub fn post_composer() -> Html {
    let pb = use_pocket_base();
    let auth = use_auth();
    let uploader = use_uploader();
    let files_ref = use_node_ref();
    let description_ref = use_node_ref();
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let Some(user) = auth.user.clone() else {
        return html! {};
    };

    let onsubmit = {
        let files_ref = files_ref.clone();
        let description_ref = description_ref.clone();
        let busy = busy.clone();
        let error = error.clone();
        let upload_file = uploader.upload_file.clone();
        let author = user.id.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(input) = files_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let files = selected_files(&input);
            if files.is_empty() {
                error.set(Some("Pick at least one file".to_string()));
                return;
            }
            input.set_value("");

            let description = description_ref
                .cast::<HtmlTextAreaElement>()
                .map(|area| area.value())
                .unwrap_or_default();

            busy.set(true);
            error.set(None);

            let pb = pb.clone();
            let busy = busy.clone();
            let error = error.clone();
            let upload_file = upload_file.clone();
            let author = author.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let new_post = NewPost {
                    author: author.clone(),
                    description: description.clone(),
                };
                match create_post(&pb, &new_post).await {
                    Ok(post) => {
                        for file in files {
                            let name = file.name();
                            upload_file.emit(UploadRequest {
                                file: NewFile {
                                    file,
                                    name,
                                    author: author.clone(),
                                    description: description.clone(),
                                },
                                on_completed: attach_to_post(&pb, &post.id),
                                on_error: show_error(&error),
                                post: post.clone(),
                            });
                        }
                    }
                    Err(e) => {
                        log::error!("❌ Could not create post: {}", e);
                        error.set(Some(e.user_message()));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <form class="post-composer" onsubmit={onsubmit}>
            <textarea ref={description_ref} placeholder="Say something about it..."></textarea>
            <input ref={files_ref} type="file" multiple={true} accept="image/*,video/*" />
            if let Some(message) = (*error).clone() {
                <p class="form-error">{message}</p>
            }
            <button type="submit" class="btn btn-gradient" disabled={*busy}>
                { if *busy { "Posting..." } else { "Post" } }
            </button>
        </form>
    }
}

fn selected_files(input: &HtmlInputElement) -> Vec<web_sys::File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

fn attach_to_post(pb: &PocketBase, post_id: &str) -> Callback<StoredFile> {
    let pb = pb.clone();
    let post_id = post_id.to_string();
    Callback::from(move |stored: StoredFile| {
        let pb = pb.clone();
        let post_id = post_id.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = attach_file(&pb, &post_id, &stored.id).await {
                log::error!("❌ Could not attach {} to post {}: {}", stored.id, post_id, e);
            }
        });
    })
}

fn show_error(error: &UseStateHandle<Option<String>>) -> Callback<ApiError> {
    let error = error.clone();
    Callback::from(move |e: ApiError| error.set(Some(e.user_message())))
}
