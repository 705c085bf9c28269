use serde::{Deserialize, Serialize};

/// A record of the PocketBase `users` auth collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
}

impl UserRecord {
    /// Name shown in the UI
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

/// Body of `auth-refresh` and the other auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub record: UserRecord,
}

/// Body of `GET /api/collections/{users}/auth-methods`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMethods {
    #[serde(default)]
    pub username_password: bool,
    #[serde(default)]
    pub email_password: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_from_pocketbase_json() {
        let json = r#"{
            "id": "u1",
            "collectionId": "_pb_users_auth_",
            "collectionName": "users",
            "username": "ana",
            "verified": true,
            "emailVisibility": false,
            "created": "2023-05-01 10:00:00.000Z"
        }"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.collection_name, "users");
        assert_eq!(user.email, None);
        assert_eq!(user.display_name(), "ana");
    }

    #[test]
    fn test_auth_methods_missing_flags_are_false() {
        let methods: AuthMethods = serde_json::from_str(r#"{"emailPassword": true}"#).unwrap();
        assert!(methods.email_password);
        assert!(!methods.username_password);
    }
}
