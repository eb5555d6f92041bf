//! User entity and role types

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Roles recognized by the service.
///
/// Serialized as the bare variant name ("User", "Administrator", ...) so role
/// lists in stored documents and token claims stay plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Base role assigned to every created account
    User,
    Administrator,
    /// Machine-to-machine callers (token service, other internal services)
    Service,
    God,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Administrator => "Administrator",
            Self::Service => "Service",
            Self::God => "God",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User record as persisted in the document store.
///
/// `password` holds the hash once a record has gone through the service layer;
/// it is never exposed through the API (responses use a separate DTO).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the document store on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl User {
    /// Hex form of the store-assigned identifier, if any
    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|oid| oid.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: None,
            username: "jane".to_string(),
            password: "argon2-hash".to_string(),
            roles: vec![Role::User],
            created: Some(Utc::now()),
            profile_photo: Some("photo.png".to_string()),
        }
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"User\"");
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"Administrator\""
        );
        assert_eq!(serde_json::to_string(&Role::Service).unwrap(), "\"Service\"");
        assert_eq!(serde_json::to_string(&Role::God).unwrap(), "\"God\"");
    }

    #[test]
    fn test_role_round_trip() {
        let roles: Vec<Role> = serde_json::from_str(r#"["User", "Service"]"#).unwrap();
        assert_eq!(roles, vec![Role::User, Role::Service]);
    }

    #[test]
    fn test_user_serialization_skips_missing_id() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("_id"));
    }

    #[test]
    fn test_user_serialization_includes_assigned_id() {
        let mut user = sample_user();
        let oid = ObjectId::new();
        user.id = Some(oid);

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("_id"));
        assert_eq!(user.id_hex(), Some(oid.to_hex()));
    }

    #[test]
    fn test_user_deserialization_defaults() {
        let user: User = serde_json::from_str(r#"{"username": "jane"}"#).unwrap();
        assert_eq!(user.username, "jane");
        assert!(user.password.is_empty());
        assert!(user.roles.is_empty());
        assert!(user.created.is_none());
        assert!(user.profile_photo.is_none());
    }
}
