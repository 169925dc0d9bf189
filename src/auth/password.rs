use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{debug, error};

fn argon2_error(op: &'static str, e: argon2::password_hash::Error) -> anyhow::Error {
    error!(error = %e, op, "argon2 failure");
    anyhow::anyhow!("argon2 {op}: {e}")
}

/// PHC-encoded Argon2id hash of `plain` under a fresh OS-random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| argon2_error("hash", e))
}

/// Runs [`hash_password`] on tokio's blocking pool.
///
/// One Argon2 run holds ~19 MiB and tens of milliseconds of CPU; on a runtime
/// worker it would stall every other request scheduled there.
pub async fn hash_password_off_executor(plain: String) -> anyhow::Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("password hashing task")??;
    debug!("password hashed");
    Ok(hash)
}

/// Malformed `hash` strings are an error rather than a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| argon2_error("parse", e))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
