use std::sync::Arc;

use crate::storage::{CreateOutcome, KvKey, KvStore, StoreError};
use crate::users::repo_types::User;

const USERS_PREFIX: &str = "users";

/// Typed access to `User` records in the key-value store.
#[derive(Clone)]
pub struct UserStore {
    kv: Arc<dyn KvStore>,
}

fn user_key(username: &str) -> KvKey {
    KvKey::new([USERS_PREFIX, username])
}

impl UserStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Find a user by username.
    pub async fn get(&self, username: &str) -> Result<Option<User>, StoreError> {
        match self.kv.get(&user_key(username)).await? {
            Some(entry) => Ok(Some(serde_json::from_value(entry.value)?)),
            None => Ok(None),
        }
    }

    /// Persist `user` unless a record for its username already exists.
    pub async fn create(&self, user: &User) -> Result<CreateOutcome, StoreError> {
        let value = serde_json::to_value(user)?;
        self.kv
            .create_if_absent(&user_key(&user.username), value)
            .await
    }

    /// All users in store order.
    pub async fn scan_all(&self) -> Result<Vec<User>, StoreError> {
        self.kv
            .scan_prefix(&KvKey::new([USERS_PREFIX]))
            .await?
            .into_iter()
            .map(|entry| serde_json::from_value(entry.value).map_err(StoreError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;
    use time::OffsetDateTime;

    fn store() -> UserStore {
        UserStore::new(Arc::new(MemoryKv::new()))
    }

    fn user(name: &str) -> User {
        User {
            username: name.into(),
            password_hash: "$argon2id$fake".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let users = store();
        let outcome = users.create(&user("alice")).await.unwrap();
        assert!(matches!(outcome, CreateOutcome::Created { .. }));

        let found = users.get("alice").await.unwrap().expect("alice stored");
        assert_eq!(found.username, "alice");
        assert_eq!(found.password_hash, "$argon2id$fake");
        assert!(users.get("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_create_conflicts_and_keeps_first_record() {
        let users = store();
        let mut first = user("alice");
        first.password_hash = "first".into();
        let mut second = user("alice");
        second.password_hash = "second".into();

        users.create(&first).await.unwrap();
        assert_eq!(
            users.create(&second).await.unwrap(),
            CreateOutcome::AlreadyExists
        );
        assert_eq!(users.get("alice").await.unwrap().unwrap().password_hash, "first");
    }

    #[tokio::test]
    async fn scan_all_returns_every_user() {
        let users = store();
        for name in ["carol", "alice", "bob"] {
            users.create(&user(name)).await.unwrap();
        }
        let mut names: Vec<String> = users
            .scan_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        names.sort();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn scan_all_reports_undecodable_records() {
        let kv = Arc::new(MemoryKv::new());
        kv.create_if_absent(&user_key("broken"), serde_json::json!({"nope": true}))
            .await
            .unwrap();
        let err = UserStore::new(kv).scan_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}
