use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{NewPost, Post};
use crate::pocketbase::PocketBase;

pub async fn create_post(pb: &PocketBase, post: &NewPost) -> Result<Post, ApiError> {
    let created: Post = pb.collection(&CONFIG.posts_collection).create(post).await?;
    log::info!("✅ Post {} created", created.id);
    Ok(created)
}

/// Appends an uploaded file to the post's `files` relation
pub async fn attach_file(pb: &PocketBase, post_id: &str, file_id: &str) -> Result<Post, ApiError> {
    pb.collection(&CONFIG.posts_collection)
        .update(post_id, &attach_body(file_id))
        .await
}

fn attach_body(file_id: &str) -> serde_json::Value {
    serde_json::json!({ "files+": [file_id] })
}
