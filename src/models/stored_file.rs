use serde::{Deserialize, Serialize};

/// A record of the `files` collection, returned once an upload completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Server-side file name inside the record's storage folder
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}
