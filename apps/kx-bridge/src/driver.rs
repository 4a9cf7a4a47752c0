//! 外部驱动循环

use kx_poller::PollScheduler;
use kx_storage::{ConfigurationStore, StorageError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 一次驱动：读取全部配置，每个配置派生一个 `poll_once` 任务。
///
/// 仍在执行的配置会被调度器直接丢弃，这里不做判断。
pub async fn drive_pass(
    configurations: &dyn ConfigurationStore,
    scheduler: &PollScheduler,
) -> Result<Vec<tokio::task::JoinHandle<()>>, StorageError> {
    let items = configurations.list_configurations().await?;
    debug!(target: "kx.bridge", configurations = items.len(), "driver_pass");
    let handles = items
        .into_iter()
        .map(|configuration| {
            let scheduler = scheduler.clone();
            tokio::spawn(async move {
                let outcome = scheduler.poll_once(&configuration).await;
                debug!(
                    target: "kx.bridge",
                    configuration_id = configuration.id,
                    outcome = outcome.as_str(),
                    "poll_returned"
                );
            })
        })
        .collect();
    Ok(handles)
}

/// 按节拍驱动直到 `shutdown` 完成。
pub async fn run<S>(
    configurations: Arc<dyn ConfigurationStore>,
    scheduler: PollScheduler,
    tick: Duration,
    shutdown: S,
) where
    S: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                if let Err(err) = drive_pass(configurations.as_ref(), &scheduler).await {
                    warn!(target: "kx.bridge", error = %err, "list_configurations_failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Configuration, DefaultOn};
    use kx_device::HttpDeviceClient;
    use kx_platform::{HttpAssetPlatform, PlatformSettings};
    use kx_poller::SchedulerDeps;
    use kx_storage::{InMemoryAssetMappingStore, InMemoryConfigurationStore};

    fn disabled(id: i64) -> Configuration {
        let mut configuration = Configuration::new(id, format!("http://127.0.0.1:1/{id}"));
        configuration.enable = DefaultOn::set(false);
        configuration.active = DefaultOn::set(true);
        configuration
    }

    fn scheduler(store: Arc<InMemoryConfigurationStore>) -> PollScheduler {
        let platform = HttpAssetPlatform::new(PlatformSettings {
            endpoint: "http://127.0.0.1:1".to_string(),
            token: None,
            timeout: Duration::from_secs(1),
        })
        .expect("platform client");
        PollScheduler::new(SchedulerDeps {
            configurations: store,
            asset_mappings: Arc::new(InMemoryAssetMappingStore::new()),
            devices: Arc::new(HttpDeviceClient::new()),
            platform: Arc::new(platform),
        })
    }

    #[tokio::test]
    async fn pass_polls_every_configuration() {
        let store = Arc::new(InMemoryConfigurationStore::with_configurations(vec![
            disabled(1),
            disabled(2),
            disabled(3),
        ]));
        let scheduler = scheduler(store.clone());

        let handles = drive_pass(store.as_ref(), &scheduler).await.expect("pass");
        assert_eq!(handles.len(), 3);
        for handle in handles {
            handle.await.expect("join");
        }
        // 每个禁用配置被标记为未激活一次
        assert_eq!(store.active_writes(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_on_shutdown() {
        let store = Arc::new(InMemoryConfigurationStore::with_configurations(vec![disabled(1)]));
        let scheduler = scheduler(store.clone());

        run(
            store.clone(),
            scheduler,
            Duration::from_millis(100),
            tokio::time::sleep(Duration::from_millis(350)),
        )
        .await;

        assert_eq!(store.active_writes(), 1);
    }
}
