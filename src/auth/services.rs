use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::Registration,
        errors::{RegisterError, MISSING_CREDENTIALS, PASSWORD_TOO_SHORT, USER_EXISTS},
        jwt::JwtKeys,
        password::hash_password_off_executor,
    },
    storage::CreateOutcome,
    users::{repo::UserStore, repo_types::User},
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Creates `username` exactly once and issues a session token for it.
///
/// The lookup before hashing only spares an Argon2 run on obvious duplicates.
/// Uniqueness is decided by the conditional create, so a request that loses a
/// race gets `Conflict` and never a token.
#[instrument(skip(users, keys, password))]
pub async fn register(
    users: &UserStore,
    keys: &JwtKeys,
    username: &str,
    password: &str,
) -> Result<Registration, RegisterError> {
    if username.is_empty() || password.is_empty() {
        warn!("missing credentials");
        return Err(RegisterError::Validation(MISSING_CREDENTIALS));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(RegisterError::Validation(PASSWORD_TOO_SHORT));
    }

    if users.get(username).await?.is_some() {
        warn!("username already registered");
        return Err(RegisterError::Conflict(USER_EXISTS));
    }

    let password_hash = hash_password_off_executor(password.to_owned()).await?;

    let user = User {
        username: username.to_owned(),
        password_hash,
        created_at: OffsetDateTime::now_utc(),
    };

    match users.create(&user).await? {
        CreateOutcome::Created { versionstamp } => {
            info!(versionstamp, "user registered");
        }
        CreateOutcome::AlreadyExists => {
            warn!("username taken by a concurrent registration");
            return Err(RegisterError::Conflict(USER_EXISTS));
        }
    }

    let token = keys.sign(&user.username)?;
    Ok(Registration {
        token,
        username: user.username,
    })
}
