//! PostgreSQL connection pool setup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use inlive_core::AppResult;
use inlive_core::config::DatabaseConfig;
use inlive_core::error::{AppError, ErrorKind};

/// Open a connection pool sized and timed per configuration.
pub async fn connect(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!(
        url = %redact_url(&config.url),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to connect to PostgreSQL", e)
        })
}

/// Replace the password in a connection URL before it is logged.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact_url;

    #[test]
    fn test_redact_url_hides_password() {
        assert_eq!(
            redact_url("postgres://inlive:hunter2@db:5432/inlive"),
            "postgres://inlive:****@db:5432/inlive"
        );
    }

    #[test]
    fn test_redact_url_leaves_credential_free_urls_alone() {
        assert_eq!(
            redact_url("postgres://db:5432/inlive"),
            "postgres://db:5432/inlive"
        );
        assert_eq!(
            redact_url("postgres://inlive@db/inlive"),
            "postgres://inlive@db/inlive"
        );
    }
}
