use std::cmp::Reverse;

use tracing::debug;

use crate::storage::StoreError;
use crate::users::{dto::RecentUser, repo::UserStore};

/// Number of users shown on the landing page.
pub const RECENT_USERS_LIMIT: usize = 10;

/// Most recently created users, newest first. Ties keep no particular order.
pub async fn recent_users(users: &UserStore, limit: usize) -> Result<Vec<RecentUser>, StoreError> {
    let mut all = users.scan_all().await?;
    let total = all.len();
    all.sort_by_key(|u| Reverse(u.created_at));
    all.truncate(limit);
    debug!(total, shown = all.len(), "recent users listed");
    Ok(all.into_iter().map(RecentUser::from).collect())
}
