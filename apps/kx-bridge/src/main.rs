//! 轮询驱动进程：按固定节拍为每个配置调用一次 `poll_once`。

mod driver;

use kx_config::AppConfig;
use kx_device::HttpDeviceClient;
use kx_platform::{HttpAssetPlatform, PlatformSettings};
use kx_poller::{PollScheduler, SchedulerDeps};
use kx_storage::{ConfigurationStore, PgAssetMappingStore, PgConfigurationStore, connect_pool};
use kx_telemetry::init_tracing;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    // 两个存储共用一个连接池
    let pool = connect_pool(&config.database_url).await?;
    let configurations = Arc::new(PgConfigurationStore::new(pool.clone()));
    let asset_mappings = Arc::new(PgAssetMappingStore::new(pool));

    let platform = HttpAssetPlatform::new(PlatformSettings {
        endpoint: config.platform_endpoint.clone(),
        token: config.platform_token.clone(),
        timeout: Duration::from_secs(config.platform_timeout_seconds),
    })?;

    let scheduler = PollScheduler::with_policy(
        SchedulerDeps {
            configurations: configurations.clone(),
            asset_mappings,
            devices: Arc::new(HttpDeviceClient::new()),
            platform: Arc::new(platform),
        },
        config.mapping_conflict_policy,
    );

    if config.reset_active_on_start {
        let rows = configurations.set_all_inactive().await?;
        info!(target: "kx.bridge", rows, "configurations_reset_inactive");
    }

    info!(
        target: "kx.bridge",
        platform_endpoint = %config.platform_endpoint,
        driver_tick_ms = config.driver_tick_ms,
        conflict_policy = ?config.mapping_conflict_policy,
        "driver_started"
    );
    driver::run(
        configurations,
        scheduler,
        Duration::from_millis(config.driver_tick_ms.max(1)),
        async {
            let _ = tokio::signal::ctrl_c().await;
        },
    )
    .await;
    info!(target: "kx.bridge", "driver_stopped");
    Ok(())
}
