use yew::prelude::*;

use crate::context::use_uploader;
use crate::state::{PendingUpload, UploadId, UploadStatus};

#[function_component(UploadList)]
pub fn upload_list() -> Html {
    let uploader = use_uploader();

    if uploader.uploads.is_empty() {
        return html! {};
    }

    html! {
        <ul class="upload-list">
            { for uploader.uploads.iter().map(|upload| render_upload(upload, &uploader.dismiss)) }
        </ul>
    }
}

fn render_upload(upload: &PendingUpload, dismiss: &Callback<UploadId>) -> Html {
    let id = upload.id;
    let body = match &upload.status {
        UploadStatus::InFlight => html! {
            <>
                <progress max="100" value={upload.progress.to_string()}></progress>
                <span class="upload-percent">{format!("{}%", upload.progress)}</span>
            </>
        },
        UploadStatus::Failed { reason } => html! {
            <>
                <span class="upload-error">{format!("❌ {}", reason)}</span>
                <button class="btn-icon" title="Dismiss" onclick={dismiss.reform(move |_: MouseEvent| id)}>
                    {"✕"}
                </button>
            </>
        },
    };

    html! {
        <li class="upload-item" key={id.to_string()}>
            <span class="upload-name">{upload.file.name.clone()}</span>
            {body}
        </li>
    }
}
