use serde::{Deserialize, Serialize};

/// Request body for user registration. Absent fields read as empty.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub username: String,
}

/// Body of every failed API response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub token: String,
    pub username: String,
}

impl From<Registration> for RegisterResponse {
    fn from(r: Registration) -> Self {
        Self {
            success: true,
            token: r.token,
            user: PublicUser {
                username: r.username,
            },
        }
    }
}
