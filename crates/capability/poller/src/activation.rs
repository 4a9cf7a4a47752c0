//! 配置激活状态
//!
//! `enable` 是期望状态（由配置 API 修改），`active` 是观测到的存活状态（只在这里写入）。
//! 写入是边沿触发的：只有状态确实需要改变时才落库。

use crate::error::PollError;
use domain::Configuration;
use kx_storage::ConfigurationStore;
use kx_telemetry::record_activation_write;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ConfigurationActivation {
    store: Arc<dyn ConfigurationStore>,
}

impl ConfigurationActivation {
    pub fn new(store: Arc<dyn ConfigurationStore>) -> Self {
        Self { store }
    }

    /// 未设置视为启用
    pub fn is_enabled(&self, configuration: &Configuration) -> bool {
        configuration.is_enabled()
    }

    /// 未设置视为激活
    pub fn is_active(&self, configuration: &Configuration) -> bool {
        configuration.is_active()
    }

    /// 写入存活状态，返回是否实际写入。
    ///
    /// 当前状态已等于目标状态时不写入。配置已被删除时返回 `NotFound`。
    pub async fn set_active(
        &self,
        configuration: &Configuration,
        active: bool,
    ) -> Result<bool, PollError> {
        if self.is_active(configuration) == active {
            return Ok(false);
        }

        let rows = self.store.set_active(configuration.id, active).await?;
        if rows == 0 {
            return Err(PollError::NotFound(format!(
                "configuration {}",
                configuration.id
            )));
        }
        record_activation_write();

        if active {
            info!(
                target: "kx.poller",
                configuration_id = configuration.id,
                address = %configuration.address,
                api_key = %configuration.masked_api_key(),
                enable = ?configuration.enable.raw(),
                refresh_interval_secs = configuration.refresh_interval_secs(),
                request_timeout_secs = configuration.request_timeout_secs(),
                active = ?configuration.active.raw(),
                project_ids = ?configuration.project_ids,
                "configuration_activated"
            );
        } else {
            info!(
                target: "kx.poller",
                configuration_id = configuration.id,
                "configuration_deactivated"
            );
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DefaultOn;
    use kx_storage::InMemoryConfigurationStore;

    #[tokio::test]
    async fn write_is_skipped_when_state_already_matches() {
        let mut configuration = Configuration::new(1, "http://10.0.0.5");
        configuration.active = DefaultOn::unset();
        let store = Arc::new(InMemoryConfigurationStore::with_configurations(vec![
            configuration.clone(),
        ]));
        let activation = ConfigurationActivation::new(store.clone());

        assert!(!activation.set_active(&configuration, true).await.expect("noop"));
        assert!(activation.set_active(&configuration, false).await.expect("write"));
        assert_eq!(store.active_writes(), 1);
    }

    #[tokio::test]
    async fn missing_configuration_is_not_found() {
        let mut configuration = Configuration::new(7, "http://10.0.0.7");
        configuration.active = DefaultOn::set(false);
        let activation =
            ConfigurationActivation::new(Arc::new(InMemoryConfigurationStore::new()));

        let err = activation
            .set_active(&configuration, true)
            .await
            .expect_err("deleted");
        assert!(matches!(err, PollError::NotFound(_)));
    }
}
