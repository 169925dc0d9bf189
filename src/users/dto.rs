use time::OffsetDateTime;

use crate::users::repo_types::User;

/// Public view of a user for the landing page. Never carries the hash.
#[derive(Debug, Clone)]
pub struct RecentUser {
    pub username: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for RecentUser {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            created_at: u.created_at,
        }
    }
}
