use kx_config::{AppConfig, ConfigError, MappingConflictPolicy};

// 环境变量是进程级共享状态，全部断言放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var / remove_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("KX_DATABASE_URL");
        std::env::set_var("KX_PLATFORM_ENDPOINT", "http://platform.local/v2");
    }
    let err = AppConfig::from_env().expect_err("missing database url");
    assert!(matches!(err, ConfigError::Missing(key) if key == "KX_DATABASE_URL"));

    unsafe {
        std::env::set_var("KX_DATABASE_URL", "postgresql://kx:kx@localhost:5432/kx");
        std::env::set_var("KX_PLATFORM_TOKEN", "token-1");
        std::env::set_var("KX_DRIVER_TICK_MS", "250");
        std::env::set_var("KX_MAPPING_CONFLICT_POLICY", "reject");
        std::env::set_var("KX_RESET_ACTIVE_ON_START", "off");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.platform_endpoint, "http://platform.local/v2");
    assert_eq!(config.platform_token.as_deref(), Some("token-1"));
    assert_eq!(config.platform_timeout_seconds, 30);
    assert_eq!(config.driver_tick_ms, 250);
    assert_eq!(config.mapping_conflict_policy, MappingConflictPolicy::Reject);
    assert!(!config.reset_active_on_start);

    unsafe {
        std::env::set_var("KX_DRIVER_TICK_MS", "soon");
    }
    let err = AppConfig::from_env().expect_err("invalid tick");
    assert!(matches!(
        err,
        ConfigError::Invalid(key, value) if key == "KX_DRIVER_TICK_MS" && value == "soon"
    ));
}
