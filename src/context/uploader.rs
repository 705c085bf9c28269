// ============================================================================
// UPLOADER CONTEXT - runs uploads and feeds their events into the reducer
// ============================================================================
// upload_file returns immediately. The request runs in spawn_local and
// reports back as Progress / Completed / Failed actions, then calls the
// caller's callbacks.
// ============================================================================

use yew::prelude::*;

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{Post, StoredFile};
use crate::pocketbase::{use_pocket_base, PocketBase};
use crate::services::{create_file_record, NewFile};
use crate::state::{PendingUpload, UploadAction, UploadId, UploadState};

pub struct UploadRequest {
    pub file: NewFile,
    pub post: Post,
    pub on_completed: Callback<StoredFile>,
    pub on_error: Callback<ApiError>,
}

#[derive(Clone, PartialEq)]
pub struct UploaderHandle {
    pub uploads: Vec<PendingUpload>,
    pub upload_file: Callback<UploadRequest>,
    /// Drops a retained failed upload from the list
    pub dismiss: Callback<UploadId>,
}

#[derive(Properties, PartialEq)]
pub struct UploaderContextProviderProps {
    pub children: Children,
}

#[function_component(UploaderContextProvider)]
pub fn uploader_context_provider(props: &UploaderContextProviderProps) -> Html {
    let pb = use_pocket_base();
    let state = use_reducer(|| UploadState::new(CONFIG.failed_upload_policy));

    let upload_file = {
        let dispatcher = state.dispatcher();
        Callback::from(move |request: UploadRequest| {
            start_upload(&pb, dispatcher.clone(), request);
        })
    };

    let dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: UploadId| dispatcher.dispatch(UploadAction::Dismissed { id }))
    };

    let handle = UploaderHandle {
        uploads: state.uploads.clone(),
        upload_file,
        dismiss,
    };

    html! {
        <ContextProvider<UploaderHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<UploaderHandle>>
    }
}

fn start_upload(pb: &PocketBase, dispatcher: UseReducerDispatcher<UploadState>, request: UploadRequest) {
    let pending = PendingUpload::new(request.file.meta(), request.post.id.clone());
    let id = pending.id;
    dispatcher.dispatch(UploadAction::Started(pending));

    let pb = pb.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let on_progress = {
            let dispatcher = dispatcher.clone();
            move |progress: Option<f64>| dispatcher.dispatch(UploadAction::Progress { id, progress })
        };

        let outcome = create_file_record(&pb, &CONFIG.files_collection, &request.file, on_progress).await;
        finish_upload(
            |action| dispatcher.dispatch(action),
            id,
            &request.file.name,
            outcome,
            &request.on_completed,
            &request.on_error,
        );
    });
}

/// Folds the result of one upload into the reducer, then tells the caller
pub(crate) fn finish_upload(
    dispatch: impl Fn(UploadAction),
    id: UploadId,
    name: &str,
    outcome: Result<StoredFile, ApiError>,
    on_completed: &Callback<StoredFile>,
    on_error: &Callback<ApiError>,
) {
    match outcome {
        Ok(file) => {
            log::info!("✅ Upload {} stored as {}", name, file.id);
            dispatch(UploadAction::Completed { id });
            on_completed.emit(file);
        }
        Err(e) => {
            log::error!("❌ Upload {} failed: {}", name, e);
            dispatch(UploadAction::Failed {
                id,
                reason: e.user_message(),
            });
            on_error.emit(e);
        }
    }
}

#[hook]
pub fn use_uploader() -> UploaderHandle {
    use_context::<UploaderHandle>().expect("use_uploader must be called under an UploaderContextProvider")
}
