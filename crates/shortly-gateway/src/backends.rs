use std::sync::Arc;

use anyhow::Context;
use redis::aio::ConnectionManager;
use shortly_cache::{
    LayeredCache, MokaCacheConfig, MokaUrlCache, NoopUrlCache, RedisCacheConfig, RedisUrlCache,
};
use shortly_core::{IdSource, Repository, UrlCache};
use shortly_idgen::{InMemoryIdSource, MySqlIdSource, RedisIdSource, RedisIdSourceConfig};
use shortly_shortener::{Shortener, ShortenerService};
use shortly_storage::{InMemoryRepository, MySqlRepository};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use crate::cli::{CacheBackendArg, Cli, IdSourceArg, StorageBackendArg};

/// Connections opened once and handed to every backend that needs them.
#[derive(Default)]
struct Connections {
    redis: Option<ConnectionManager>,
    mysql: Option<MySqlPool>,
}

impl Connections {
    async fn open(cli: &Cli) -> anyhow::Result<Self> {
        let needs_redis = cli.id_source == IdSourceArg::Redis
            || matches!(cli.cache, CacheBackendArg::Redis | CacheBackendArg::Layered);
        let needs_mysql =
            cli.storage == StorageBackendArg::Mysql || cli.id_source == IdSourceArg::Mysql;

        let mut connections = Self::default();

        if needs_redis {
            let url = cli.redis_url.as_deref().context("redis url is required")?;
            let client = redis::Client::open(url).context("invalid redis url")?;
            let conn = tokio::time::timeout(cli.timeout(), ConnectionManager::new(client))
                .await
                .context("timed out connecting to redis")?
                .context("failed to connect to redis")?;
            info!("connected to redis");
            connections.redis = Some(conn);
        }

        if needs_mysql {
            let dsn = cli.mysql_dsn.as_deref().context("mysql dsn is required")?;
            let pool = MySqlPoolOptions::new()
                .acquire_timeout(cli.timeout())
                .connect(dsn)
                .await
                .context("failed to connect to mysql")?;
            info!("connected to mysql");
            connections.mysql = Some(pool);
        }

        Ok(connections)
    }

    fn redis(&self) -> anyhow::Result<ConnectionManager> {
        self.redis.clone().context("redis connection was not opened")
    }

    fn mysql(&self) -> anyhow::Result<MySqlPool> {
        self.mysql.clone().context("mysql pool was not opened")
    }
}

async fn id_source(cli: &Cli, connections: &Connections) -> anyhow::Result<Arc<dyn IdSource>> {
    let source: Arc<dyn IdSource> = match cli.id_source {
        IdSourceArg::InMemory => Arc::new(InMemoryIdSource::new()),
        IdSourceArg::Redis => {
            let config = RedisIdSourceConfig::builder().timeout(cli.timeout()).build();
            Arc::new(RedisIdSource::new(connections.redis()?, config))
        }
        IdSourceArg::Mysql => {
            let source = MySqlIdSource::with_timeout(connections.mysql()?, cli.timeout());
            source
                .create_schema()
                .await
                .context("failed to create id_sequence table")?;
            Arc::new(source)
        }
    };
    Ok(source)
}

fn cache(cli: &Cli, connections: &Connections) -> anyhow::Result<Arc<dyn UrlCache>> {
    let moka = || -> MokaUrlCache {
        MokaCacheConfig::builder()
            .max_capacity(cli.cache_capacity)
            .ttl(cli.cache_ttl())
            .build()
            .into()
    };
    let redis = || -> anyhow::Result<RedisUrlCache> {
        let config = RedisCacheConfig::builder()
            .ttl(cli.cache_ttl())
            .timeout(cli.timeout())
            .build();
        Ok(RedisUrlCache::new(connections.redis()?, config))
    };

    let cache: Arc<dyn UrlCache> = match cli.cache {
        CacheBackendArg::None => Arc::new(NoopUrlCache),
        CacheBackendArg::Moka => Arc::new(moka()),
        CacheBackendArg::Redis => Arc::new(redis()?),
        CacheBackendArg::Layered => Arc::new(LayeredCache::new(moka(), redis()?)),
    };
    Ok(cache)
}

async fn repository(
    cli: &Cli,
    connections: &Connections,
) -> anyhow::Result<Arc<dyn Repository>> {
    let repository: Arc<dyn Repository> = match cli.storage {
        StorageBackendArg::InMemory => Arc::new(InMemoryRepository::new()),
        StorageBackendArg::Mysql => {
            let repository = MySqlRepository::new(connections.mysql()?).with_timeout(cli.timeout());
            repository
                .create_schema()
                .await
                .context("failed to create urls table")?;
            Arc::new(repository)
        }
    };
    Ok(repository)
}

/// Builds the orchestrator from the backends selected on the command line.
pub async fn build_shortener(cli: &Cli) -> anyhow::Result<Arc<dyn Shortener>> {
    let connections = Connections::open(cli).await?;

    let id_source = id_source(cli, &connections).await?;
    let cache = cache(cli, &connections)?;
    let repository = repository(cli, &connections).await?;

    Ok(Arc::new(ShortenerService::new(id_source, cache, repository)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn in_process_backends_need_no_connections() {
        let cli = Cli::try_parse_from(["shortly-gateway", "--cache", "none"]).unwrap();

        let shortener = build_shortener(&cli).await.unwrap();
        let mapping = shortener
            .create(shortly_shortener::ShortenParams::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(mapping.short_code.as_str(), "1");
        assert_eq!(
            shortener.resolve("1").await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn unreachable_redis_fails_startup() {
        let cli = Cli::try_parse_from([
            "shortly-gateway",
            "--id-source",
            "redis",
            "--redis-url",
            "redis://127.0.0.1:1",
            "--timeout-ms",
            "500",
        ])
        .unwrap();

        assert!(build_shortener(&cli).await.is_err());
    }
}
