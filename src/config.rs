use std::ops::RangeInclusive;

use anyhow::Context;

/// Well-known development secret. Never acceptable in production.
pub const INSECURE_DEV_SECRET: &str = "your-secret-key";

/// Accepted token lifetimes: one minute up to one year.
pub const TTL_MINUTES_RANGE: RangeInclusive<i64> = 1..=525_600;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    /// Set when `JWT_SECRET` was absent and the dev fallback is in use.
    pub insecure_secret: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("APP_ENV").as_deref() == Some("production");

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", v))?,
            None => 8000,
        };

        let (secret, insecure_secret) = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(s) => (s, false),
            None if production => anyhow::bail!("JWT_SECRET must be set when APP_ENV=production"),
            None => (INSECURE_DEV_SECRET.to_string(), true),
        };

        let ttl_minutes = match lookup("JWT_TTL_MINUTES") {
            Some(v) => {
                let minutes = v.parse::<i64>().with_context(|| {
                    format!("JWT_TTL_MINUTES must be a whole number of minutes, got {:?}", v)
                })?;
                if !TTL_MINUTES_RANGE.contains(&minutes) {
                    anyhow::bail!(
                        "JWT_TTL_MINUTES must be between {} and {}, got {}",
                        TTL_MINUTES_RANGE.start(),
                        TTL_MINUTES_RANGE.end(),
                        minutes
                    );
                }
                minutes
            }
            None => 60,
        };

        let jwt = JwtConfig {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "userboard".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "userboard-users".into()),
            ttl_minutes,
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            jwt,
            insecure_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = load(&[]).expect("defaults load");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.jwt.secret, INSECURE_DEV_SECRET);
        assert!(cfg.insecure_secret);
        assert_eq!(cfg.jwt.ttl_minutes, 60);
    }

    #[test]
    fn reads_port_and_secret() {
        let cfg = load(&[("PORT", "9090"), ("JWT_SECRET", "s3cret")]).expect("load");
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.jwt.secret, "s3cret");
        assert!(!cfg.insecure_secret);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn production_requires_secret() {
        let err = load(&[("APP_ENV", "production")]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let cfg = load(&[("APP_ENV", "production"), ("JWT_SECRET", "prod")]).expect("load");
        assert_eq!(cfg.jwt.secret, "prod");
    }

    #[test]
    fn reads_ttl_within_range() {
        let cfg = load(&[("JWT_TTL_MINUTES", "15")]).expect("load");
        assert_eq!(cfg.jwt.ttl_minutes, 15);
        let cfg = load(&[("JWT_TTL_MINUTES", "525600")]).expect("load");
        assert_eq!(cfg.jwt.ttl_minutes, 525_600);
    }

    #[test]
    fn rejects_out_of_range_or_garbled_ttl() {
        for bad in ["-5", "0", "abc", "10000000000", "525601"] {
            let err = load(&[("JWT_TTL_MINUTES", bad)]).unwrap_err();
            assert!(
                err.to_string().contains("JWT_TTL_MINUTES"),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let cfg = load(&[("DATABASE_URL", "")]).expect("load");
        assert!(cfg.database_url.is_none());
    }
}
