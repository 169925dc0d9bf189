use crate::config::AppConfig;
use crate::db::PgKv;
use crate::storage::{KvStore, MemoryKv};
use crate::users::repo::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserStore,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        if config.insecure_secret {
            tracing::warn!(
                "JWT_SECRET is not set; signing tokens with the well-known development secret"
            );
        }

        let kv = match &config.database_url {
            Some(url) => Arc::new(PgKv::connect(url).await?) as Arc<dyn KvStore>,
            None => {
                tracing::warn!("DATABASE_URL is not set; users are kept in memory only");
                Arc::new(MemoryKv::new()) as Arc<dyn KvStore>
            }
        };

        Ok(Self::from_parts(config, kv))
    }

    pub fn from_parts(config: Arc<AppConfig>, kv: Arc<dyn KvStore>) -> Self {
        Self {
            config,
            users: UserStore::new(kv),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(Arc::new(MemoryKv::new()))
    }

    #[cfg(test)]
    pub fn fake_with(kv: Arc<dyn KvStore>) -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: None,
            jwt: crate::config::JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 60,
            },
            insecure_secret: false,
        });
        Self::from_parts(config, kv)
    }
}
