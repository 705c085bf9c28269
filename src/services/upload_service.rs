// ============================================================================
// UPLOAD SERVICE - multipart POST of one file record, with upload progress
// ============================================================================
// fetch() exposes no upload progress, so this goes through XMLHttpRequest and
// bridges its callbacks to a future with a oneshot channel.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};

use crate::error::ApiError;
use crate::models::StoredFile;
use crate::pocketbase::{parse_response, PocketBase};
use crate::state::FileMeta;

/// Parts of the multipart body, in the order they are appended
pub const MULTIPART_FIELDS: [&str; 5] = ["file", "name", "type", "author", "description"];

/// A file picked by the user plus the metadata stored next to it
#[derive(Clone)]
pub struct NewFile {
    pub file: web_sys::File,
    pub name: String,
    pub author: String,
    pub description: String,
}

impl NewFile {
    pub fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.file.name(),
            mime_type: self.file.type_(),
            size: self.file.size() as u64,
        }
    }
}

/// Text parts that follow the binary `file` part
pub fn text_fields<'a>(
    name: &'a str,
    mime_type: &'a str,
    author: &'a str,
    description: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        (MULTIPART_FIELDS[1], name),
        (MULTIPART_FIELDS[2], mime_type),
        (MULTIPART_FIELDS[3], author),
        (MULTIPART_FIELDS[4], description),
    ]
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

fn build_form(new_file: &NewFile) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob(MULTIPART_FIELDS[0], &new_file.file)
        .map_err(js_error)?;

    let mime_type = new_file.file.type_();
    for (key, value) in text_fields(&new_file.name, &mime_type, &new_file.author, &new_file.description) {
        form.append_with_str(key, value).map_err(js_error)?;
    }
    Ok(form)
}

/// Creates a record in `collection` from `new_file`. `on_progress` receives the
/// transferred fraction whenever the browser reports it.
pub async fn create_file_record(
    pb: &PocketBase,
    collection: &str,
    new_file: &NewFile,
    on_progress: impl Fn(Option<f64>) + 'static,
) -> Result<StoredFile, ApiError> {
    let url = pb.collection(collection).records_url();
    let form = build_form(new_file)?;

    log::info!("📤 Uploading {} to {}", new_file.name, url);
    let (status, body) = send_multipart(&url, &pb.auth_store().token(), &form, on_progress).await?;
    parse_response(status, &body)
}

type Outcome = Result<(u16, String), ApiError>;

async fn send_multipart(
    url: &str,
    token: &str,
    form: &FormData,
    on_progress: impl Fn(Option<f64>) + 'static,
) -> Outcome {
    let xhr = XmlHttpRequest::new().map_err(js_error)?;
    xhr.open("POST", url).map_err(js_error)?;
    if !token.is_empty() {
        xhr.set_request_header("Authorization", token)
            .map_err(js_error)?;
    }

    let (sender, receiver) = oneshot::channel::<Outcome>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let progress_handler = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
        let fraction = if event.length_computable() && event.total() > 0.0 {
            Some(event.loaded() / event.total())
        } else {
            None
        };
        on_progress(fraction);
    });

    let load_handler = {
        let xhr = xhr.clone();
        let sender = sender.clone();
        Closure::<dyn FnMut()>::new(move || {
            let status = xhr.status().unwrap_or(0);
            let body = xhr.response_text().ok().flatten().unwrap_or_default();
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(Ok((status, body)));
            }
        })
    };

    let error_handler = {
        let sender = sender.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(Err(ApiError::Network(
                    "the upload failed before the server answered".to_string(),
                )));
            }
        })
    };

    let upload = xhr.upload().map_err(js_error)?;
    upload.set_onprogress(Some(progress_handler.as_ref().unchecked_ref()));
    xhr.set_onload(Some(load_handler.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(error_handler.as_ref().unchecked_ref()));
    xhr.set_onabort(Some(error_handler.as_ref().unchecked_ref()));

    xhr.send_with_opt_form_data(Some(form)).map_err(js_error)?;

    let outcome = receiver
        .await
        .unwrap_or_else(|_| Err(ApiError::Network("the upload was dropped".to_string())));

    // Handlers must not outlive their closures
    upload.set_onprogress(None);
    xhr.set_onload(None);
    xhr.set_onerror(None);
    xhr.set_onabort(None);
    drop((progress_handler, load_handler, error_handler));

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_follow_file_part() {
        let fields = text_fields("Sunset", "image/jpeg", "u1", "From the pier");

        assert_eq!(
            fields,
            [
                ("name", "Sunset"),
                ("type", "image/jpeg"),
                ("author", "u1"),
                ("description", "From the pier"),
            ]
        );
        assert_eq!(MULTIPART_FIELDS[0], "file");
    }
}
