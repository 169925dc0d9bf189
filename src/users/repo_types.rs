use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// User record as persisted under `["users", <username>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,           // store key, unique
    pub password_hash: String,      // Argon2 PHC string
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime, // set once at creation
}
