//! 轮询调度器
//!
//! 每个配置 ID 同一时刻至多一个周期在执行。周期结束后（无论成功与否）继续占用
//! 许可 `refresh_interval` 秒再释放，因此外部驱动调用得再频繁，同一配置的两次周期
//! 间隔也不会小于周期耗时加刷新间隔。停用检查在许可之外，下一次调用即生效。

use crate::activation::ConfigurationActivation;
use crate::error::PollError;
use crate::in_flight::InFlightSet;
use crate::registry::AssetRegistry;
use crate::synchronizer::{AssetSynchronizer, ProjectAsset};
use domain::{Configuration, DeviceClass, DeviceDescriptor};
use kx_config::MappingConflictPolicy;
use kx_device::{DeviceSource, DeviceTarget};
use kx_platform::{AssetPlatform, DataSubtype};
use kx_storage::{AssetMappingStore, ConfigurationStore};
use kx_telemetry::{
    new_cycle_id, record_cycle_aborted, record_cycle_completed, record_cycle_skipped,
    record_cycle_started,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, info, info_span, warn};

/// 一次 `poll_once` 调用的结果（仅供观测，调度器不向外抛错）。
#[derive(Debug)]
pub enum PollOutcome {
    /// 周期完整执行
    Completed(DeviceClass),
    /// 周期中途失败，本配置本轮剩余步骤被跳过
    Aborted(PollError),
    /// 同一配置已有周期在执行，本次调用直接丢弃
    Skipped,
    /// 配置未启用
    Disabled,
}

impl PollOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed(_) => "completed",
            Self::Aborted(_) => "aborted",
            Self::Skipped => "skipped",
            Self::Disabled => "disabled",
        }
    }
}

/// 调度器依赖的协作方。
#[derive(Clone)]
pub struct SchedulerDeps {
    pub configurations: Arc<dyn ConfigurationStore>,
    pub asset_mappings: Arc<dyn AssetMappingStore>,
    pub devices: Arc<dyn DeviceSource>,
    pub platform: Arc<dyn AssetPlatform>,
}

struct SchedulerInner {
    configurations: Arc<dyn ConfigurationStore>,
    devices: Arc<dyn DeviceSource>,
    activation: ConfigurationActivation,
    synchronizer: AssetSynchronizer,
    in_flight: InFlightSet,
}

/// 轮询调度器
///
/// 可廉价克隆；克隆体共享同一个在途集合。
#[derive(Clone)]
pub struct PollScheduler {
    inner: Arc<SchedulerInner>,
}

impl PollScheduler {
    pub fn new(deps: SchedulerDeps) -> Self {
        Self::with_policy(deps, MappingConflictPolicy::LastWriteWins)
    }

    pub fn with_policy(deps: SchedulerDeps, conflict_policy: MappingConflictPolicy) -> Self {
        let registry = AssetRegistry::with_policy(deps.asset_mappings, conflict_policy);
        let inner = SchedulerInner {
            activation: ConfigurationActivation::new(deps.configurations.clone()),
            configurations: deps.configurations,
            devices: deps.devices,
            synchronizer: AssetSynchronizer::new(registry, deps.platform),
            in_flight: InFlightSet::new(),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn synchronizer(&self) -> &AssetSynchronizer {
        &self.inner.synchronizer
    }

    pub fn is_in_flight(&self, configuration_id: i64) -> bool {
        self.inner.in_flight.contains(configuration_id)
    }

    /// 为一个配置执行一次轮询周期。
    ///
    /// 先读取库中最新配置：已停用的配置无论是否有周期在途都立即置为未激活，
    /// 启用的配置才去争抢在途许可。所有失败都在这里记录日志并吸收，不影响其他配置。
    pub async fn poll_once(&self, configuration: &Configuration) -> PollOutcome {
        let configuration_id = configuration.id;
        let configuration = match self
            .inner
            .configurations
            .find_configuration(configuration_id)
            .await
        {
            Ok(Some(configuration)) => configuration,
            Ok(None) => {
                return self.abort(
                    configuration_id,
                    PollError::NotFound(format!("configuration {configuration_id}")),
                );
            }
            Err(err) => return self.abort(configuration_id, err.into()),
        };

        if !self.inner.activation.is_enabled(&configuration) {
            self.deactivate(&configuration).await;
            return PollOutcome::Disabled;
        }

        let Some(_permit) = self.inner.in_flight.try_acquire(configuration_id) else {
            record_cycle_skipped();
            debug!(
                target: "kx.poller",
                configuration_id,
                "cycle_skipped_in_flight"
            );
            return PollOutcome::Skipped;
        };

        let cycle_id = new_cycle_id();
        let span = info_span!(
            "poll_cycle",
            configuration_id,
            cycle_id = %cycle_id
        );
        self.run_guarded(&configuration).instrument(span).await
    }

    async fn deactivate(&self, configuration: &Configuration) {
        let activation = &self.inner.activation;
        if !activation.is_active(configuration) {
            return;
        }
        if let Err(err) = activation.set_active(configuration, false).await {
            warn!(
                target: "kx.poller",
                configuration_id = configuration.id,
                error = %err,
                "configuration_deactivate_failed"
            );
        }
    }

    async fn run_guarded(&self, configuration: &Configuration) -> PollOutcome {
        let configuration_id = configuration.id;
        let activation = &self.inner.activation;
        if !activation.is_active(configuration) {
            if let Err(err) = activation.set_active(configuration, true).await {
                warn!(
                    target: "kx.poller",
                    configuration_id,
                    error = %err,
                    "configuration_activate_failed"
                );
            }
        }

        record_cycle_started();
        info!(
            target: "kx.poller",
            configuration_id,
            address = %configuration.address,
            "cycle_started"
        );
        let outcome = match self.run_cycle(configuration).await {
            Ok(class) => {
                record_cycle_completed();
                info!(
                    target: "kx.poller",
                    configuration_id,
                    device_class = class.as_str(),
                    "cycle_finished"
                );
                PollOutcome::Completed(class)
            }
            Err(err) => self.abort(configuration_id, err),
        };

        tokio::time::sleep(Duration::from_secs(configuration.refresh_interval_secs())).await;
        outcome
    }

    fn abort(&self, configuration_id: i64, err: PollError) -> PollOutcome {
        record_cycle_aborted();
        warn!(
            target: "kx.poller",
            configuration_id,
            error_kind = err.kind(),
            error = %err,
            "cycle_aborted"
        );
        PollOutcome::Aborted(err)
    }

    async fn run_cycle(&self, configuration: &Configuration) -> Result<DeviceClass, PollError> {
        let target = DeviceTarget::from_configuration(configuration);
        let device = self.inner.devices.fetch_device(&target).await?;
        debug!(
            target: "kx.poller",
            serial = %device.serial,
            type_code = device.type_code,
            device_class = device.class.as_str(),
            "device_fetched"
        );

        match device.class {
            DeviceClass::AlarmManager => {
                self.reconcile_device(configuration, &device).await?;
            }
            DeviceClass::AccessController => {
                self.reconcile_device(configuration, &device).await?;
                self.poll_doors(configuration, &target, &device).await?;
            }
            DeviceClass::MultiSensor => {
                let assets = self.reconcile_device(configuration, &device).await?;
                let reading = self
                    .inner
                    .devices
                    .fetch_multi_sensor_reading(&target)
                    .await?;
                self.inner
                    .synchronizer
                    .push_data(&assets, DataSubtype::Input, reading.attributes())
                    .await?;
            }
            DeviceClass::Unknown => {
                info!(
                    target: "kx.poller",
                    serial = %device.serial,
                    type_code = device.type_code,
                    "device_class_unknown"
                );
            }
        }
        Ok(device.class)
    }

    async fn reconcile_device(
        &self,
        configuration: &Configuration,
        device: &DeviceDescriptor,
    ) -> Result<Vec<ProjectAsset>, PollError> {
        let synchronizer = &self.inner.synchronizer;
        let assets = synchronizer
            .ensure_device_assets(configuration, device)
            .await?;
        synchronizer.push_device_info(&assets, device).await?;
        Ok(assets)
    }

    async fn poll_doors(
        &self,
        configuration: &Configuration,
        target: &DeviceTarget,
        controller: &DeviceDescriptor,
    ) -> Result<(), PollError> {
        let doors = self
            .inner
            .devices
            .fetch_sub_devices(target, &controller.serial)
            .await?;
        let door_assets = self
            .inner
            .synchronizer
            .ensure_sub_device_assets(configuration, &doors)
            .await?;

        for door in &door_assets {
            let reading = self
                .inner
                .devices
                .fetch_door_reading(target, &door.serial)
                .await?;
            self.inner
                .synchronizer
                .push_data(&door.assets, DataSubtype::Input, reading.attributes())
                .await?;
        }
        Ok(())
    }
}
