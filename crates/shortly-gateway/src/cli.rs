use clap::{Parser, ValueEnum};
use shortly_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "SHORTLY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SHORTLY_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SHORTLY_STORAGE_BACKEND";
pub const ID_SOURCE_ENV: &str = "SHORTLY_ID_SOURCE";
pub const CACHE_BACKEND_ENV: &str = "SHORTLY_CACHE_BACKEND";
pub const REDIS_URL_ENV: &str = "SHORTLY_REDIS_URL";
pub const MYSQL_DSN_ENV: &str = "SHORTLY_MYSQL_DSN";
pub const CACHE_TTL_SECS_ENV: &str = "SHORTLY_CACHE_TTL_SECS";
pub const CACHE_CAPACITY_ENV: &str = "SHORTLY_CACHE_CAPACITY";
pub const TIMEOUT_MS_ENV: &str = "SHORTLY_TIMEOUT_MS";
pub const LOG_FORMAT_ENV: &str = "SHORTLY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdSourceArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for IdSourceArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdSourceArg::InMemory => write!(f, "in-memory"),
            IdSourceArg::Redis => write!(f, "redis"),
            IdSourceArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "none")]
    None,
    #[value(name = "moka")]
    Moka,
    #[value(name = "redis")]
    Redis,
    /// Moka in front of Redis.
    #[value(name = "layered")]
    Layered,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::None => write!(f, "none"),
            CacheBackendArg::Moka => write!(f, "moka"),
            CacheBackendArg::Redis => write!(f, "redis"),
            CacheBackendArg::Layered => write!(f, "layered"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "shortly-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public prefix of every short URL handed back to clients.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(
        long,
        env = ID_SOURCE_ENV,
        value_enum,
        default_value_t = IdSourceArg::InMemory
    )]
    pub id_source: IdSourceArg,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::Moka
    )]
    pub cache: CacheBackendArg,

    #[arg(
        long,
        env = REDIS_URL_ENV,
        required_if_eq_any([("id_source", "redis"), ("cache", "redis"), ("cache", "layered")])
    )]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = MYSQL_DSN_ENV,
        required_if_eq_any([("storage", "mysql"), ("id_source", "mysql")])
    )]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = CACHE_TTL_SECS_ENV, default_value_t = 3600)]
    pub cache_ttl_secs: u64,

    /// Upper bound on entries held by the in-process cache.
    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = 10_000)]
    pub cache_capacity: u64,

    /// Bound applied to every Redis command and MySQL statement.
    #[arg(long, env = TIMEOUT_MS_ENV, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// `pretty` or `json`.
    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("shortly-gateway").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_need_no_backends() {
        let cli = parse(&[]).unwrap();

        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.id_source, IdSourceArg::InMemory);
        assert_eq!(cli.cache, CacheBackendArg::Moka);
        assert_eq!(cli.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(cli.timeout(), Duration::from_millis(5000));
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn redis_id_source_requires_redis_url() {
        assert!(parse(&["--id-source", "redis"]).is_err());
        let cli = parse(&["--id-source", "redis", "--redis-url", "redis://r:6379"]).unwrap();
        assert_eq!(cli.redis_url.as_deref(), Some("redis://r:6379"));
    }

    #[test]
    fn layered_cache_requires_redis_url() {
        assert!(parse(&["--cache", "layered"]).is_err());
    }

    #[test]
    fn mysql_storage_requires_dsn() {
        assert!(parse(&["--storage", "mysql"]).is_err());
        assert!(parse(&["--storage", "mysql", "--mysql-dsn", "mysql://u:p@db/shortly"]).is_ok());
    }

    #[test]
    fn log_format_is_parsed_by_telemetry() {
        assert_eq!(parse(&[]).unwrap().log_format, LogFormat::Pretty);
        assert_eq!(parse(&["--log-format", "json"]).unwrap().log_format, LogFormat::Json);
        assert_eq!(parse(&["--log-format", "JSON"]).unwrap().log_format, LogFormat::Json);
        assert!(parse(&["--log-format", "xml"]).is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse(&["--cache", "memcached"]).is_err());
    }

    #[test]
    fn value_names_match_display() {
        for arg in IdSourceArg::value_variants() {
            let name = arg.to_possible_value().unwrap();
            assert_eq!(name.get_name(), arg.to_string());
        }
        for arg in CacheBackendArg::value_variants() {
            let name = arg.to_possible_value().unwrap();
            assert_eq!(name.get_name(), arg.to_string());
        }
    }
}
