use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{error, instrument};

use crate::{
    state::AppState,
    users::{
        dto::RecentUser,
        services::{recent_users, RECENT_USERS_LIMIT},
    },
};

pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    let users = recent_users(&state.users, RECENT_USERS_LIMIT)
        .await
        .map_err(|e| {
            error!(error = %e, "listing recent users failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load users".to_string(),
            )
        })?;
    Ok(Html(render_index(&users, OffsetDateTime::now_utc())))
}

fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_index(users: &[RecentUser], rendered_at: OffsetDateTime) -> String {
    let items = if users.is_empty() {
        r#"<li class="empty">No users yet.</li>"#.to_string()
    } else {
        users
            .iter()
            .map(|u| {
                format!(
                    r#"<li><span class="name">{name}</span> <time datetime="{ts}">{ts}</time></li>"#,
                    name = escape_html(&u.username),
                    ts = rfc3339(u.created_at),
                )
            })
            .collect::<Vec<_>>()
            .join("\n    ")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Recent users</title>
<style>
  body {{ font-family: -apple-system, sans-serif; max-width: 640px; margin: 40px auto; color: #222; }}
  li {{ padding: 6px 0; }}
  .name {{ font-weight: 600; }}
  time {{ color: #777; font-size: 13px; margin-left: 8px; }}
  footer {{ margin-top: 24px; color: #999; font-size: 12px; }}
</style>
</head><body>
  <h1>Recent users</h1>
  <ul>
    {items}
  </ul>
  <footer>Rendered at {rendered}</footer>
</body></html>"#,
        rendered = rfc3339(rendered_at),
    )
}
