//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 资产映射冲突策略（同一映射键被记录为不同资产 ID 时）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingConflictPolicy {
    /// 后写覆盖，记录告警日志。
    LastWriteWins,
    /// 拒绝写入，返回冲突错误。
    Reject,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub platform_endpoint: String,
    pub platform_token: Option<String>,
    pub platform_timeout_seconds: u64,
    pub driver_tick_ms: u64,
    pub mapping_conflict_policy: MappingConflictPolicy,
    pub reset_active_on_start: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("KX_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("KX_DATABASE_URL".to_string()))?;
        let platform_endpoint = env::var("KX_PLATFORM_ENDPOINT")
            .map_err(|_| ConfigError::Missing("KX_PLATFORM_ENDPOINT".to_string()))?;
        let platform_token = read_optional("KX_PLATFORM_TOKEN");
        let platform_timeout_seconds =
            read_u64_with_default("KX_PLATFORM_TIMEOUT_SECONDS", 30)?.max(1);
        let driver_tick_ms = read_u64_with_default("KX_DRIVER_TICK_MS", 1000)?.max(1);
        let mapping_conflict_policy = read_conflict_policy("KX_MAPPING_CONFLICT_POLICY")?;
        let reset_active_on_start = read_bool_with_default("KX_RESET_ACTIVE_ON_START", true);

        Ok(Self {
            database_url,
            platform_endpoint,
            platform_token,
            platform_timeout_seconds,
            driver_tick_ms,
            mapping_conflict_policy,
            reset_active_on_start,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}

fn read_conflict_policy(key: &str) -> Result<MappingConflictPolicy, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(MappingConflictPolicy::LastWriteWins),
    };
    parse_conflict_policy(&value).ok_or_else(|| ConfigError::Invalid(key.to_string(), value))
}

fn parse_conflict_policy(value: &str) -> Option<MappingConflictPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "last-write-wins" | "lww" => Some(MappingConflictPolicy::LastWriteWins),
        "reject" => Some(MappingConflictPolicy::Reject),
        _ => None,
    }
}
