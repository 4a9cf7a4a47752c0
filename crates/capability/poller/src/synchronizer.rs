//! 资产同步：确保设备/子设备在平台中有且仅有一个资产，并写入最新数据

use crate::error::PollError;
use crate::registry::AssetRegistry;
use domain::{
    AssetId, AttributeValue, Configuration, DOORLOCK_ASSET_TYPE, DeviceDescriptor, DeviceRole,
    SubDeviceDescriptor,
};
use kx_platform::{AssetData, AssetPlatform, AssetUpsert, DataSubtype};
use kx_telemetry::{record_asset_created, record_data_pushed};
use std::sync::Arc;
use tracing::{info, warn};

/// 创建资产所需的展示属性。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// 映射键中的设备标识（序列号）
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub asset_type: &'static str,
}

impl AssetDescriptor {
    /// 未识别的设备类型没有资产描述。
    pub fn for_device(device: &DeviceDescriptor) -> Option<Self> {
        let asset_type = device.class.asset_type()?;
        Some(Self {
            identifier: device.serial.clone(),
            name: format!("{} ({})", device.name, device.ip_address),
            description: format!("{} ({})", device.name, device.serial),
            asset_type,
        })
    }

    pub fn for_sub_device(sub_device: &SubDeviceDescriptor) -> Self {
        Self {
            identifier: sub_device.serial.clone(),
            name: format!("{} ({})", sub_device.name, sub_device.address),
            description: format!("{} ({})", sub_device.name, sub_device.serial),
            asset_type: DOORLOCK_ASSET_TYPE,
        }
    }
}

/// 某个项目中的资产。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAsset {
    pub project_id: String,
    pub asset_id: AssetId,
}

/// 子设备在各项目中的资产。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDeviceAssets {
    pub serial: String,
    pub assets: Vec<ProjectAsset>,
}

/// 资产同步器
#[derive(Clone)]
pub struct AssetSynchronizer {
    registry: AssetRegistry,
    platform: Arc<dyn AssetPlatform>,
}

impl AssetSynchronizer {
    pub fn new(registry: AssetRegistry, platform: Arc<dyn AssetPlatform>) -> Self {
        Self { registry, platform }
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// 确保资产存在。
    ///
    /// 已有映射时直接返回，不访问平台；否则 upsert 后记录映射。
    /// upsert 成功而映射写入失败时返回持久化错误，下个周期会再次创建。
    pub async fn ensure_asset(
        &self,
        configuration: &Configuration,
        project_id: &str,
        asset: &AssetDescriptor,
        parent_asset_id: Option<AssetId>,
    ) -> Result<AssetId, PollError> {
        if let Some(asset_id) = self
            .registry
            .find_asset_id(configuration.id, project_id, &asset.identifier)
            .await?
        {
            return Ok(asset_id);
        }

        let upsert = AssetUpsert {
            project_id: project_id.to_string(),
            global_asset_identifier: asset.identifier.clone(),
            name: asset.name.clone(),
            asset_type: asset.asset_type.to_string(),
            description: asset.description.clone(),
            parent_asset_id,
        };
        let asset_id = self.platform.upsert_asset(&upsert).await?;

        self.registry
            .record_asset(configuration.id, project_id, &asset.identifier, asset_id)
            .await?;

        record_asset_created();
        info!(
            target: "kx.poller",
            configuration_id = configuration.id,
            project_id = %project_id,
            identifier = %asset.identifier,
            asset_type = asset.asset_type,
            asset_id = %asset_id,
            parent_asset_id = ?parent_asset_id.map(AssetId::value),
            "asset_created"
        );
        Ok(asset_id)
    }

    /// 在每个项目中确保设备自身的资产（无父资产）。
    ///
    /// 未识别类型的设备返回空列表。
    pub async fn ensure_device_assets(
        &self,
        configuration: &Configuration,
        device: &DeviceDescriptor,
    ) -> Result<Vec<ProjectAsset>, PollError> {
        let Some(asset) = AssetDescriptor::for_device(device) else {
            return Ok(Vec::new());
        };
        let mut assets = Vec::with_capacity(configuration.project_ids.len());
        for project_id in &configuration.project_ids {
            let asset_id = self
                .ensure_asset(configuration, project_id, &asset, None)
                .await?;
            assets.push(ProjectAsset {
                project_id: project_id.clone(),
                asset_id,
            });
        }
        Ok(assets)
    }

    /// 在每个项目中确保子设备资产，父资产按父设备序列号解析。
    ///
    /// 单个子设备失败不影响同级子设备，全部处理完后返回第一个错误。
    pub async fn ensure_sub_device_assets(
        &self,
        configuration: &Configuration,
        sub_devices: &[SubDeviceDescriptor],
    ) -> Result<Vec<SubDeviceAssets>, PollError> {
        let mut resolved: Vec<SubDeviceAssets> = sub_devices
            .iter()
            .map(|sub_device| SubDeviceAssets {
                serial: sub_device.serial.clone(),
                assets: Vec::new(),
            })
            .collect();
        let mut first_error = None;

        for project_id in &configuration.project_ids {
            for (sub_device, slot) in sub_devices.iter().zip(resolved.iter_mut()) {
                match self
                    .ensure_sub_device_asset(configuration, project_id, sub_device)
                    .await
                {
                    Ok(asset_id) => slot.assets.push(ProjectAsset {
                        project_id: project_id.clone(),
                        asset_id,
                    }),
                    Err(err) => {
                        warn!(
                            target: "kx.poller",
                            configuration_id = configuration.id,
                            project_id = %project_id,
                            identifier = %sub_device.serial,
                            parent = %sub_device.parent_serial,
                            error_kind = err.kind(),
                            error = %err,
                            "sub_device_asset_failed"
                        );
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(resolved),
        }
    }

    async fn ensure_sub_device_asset(
        &self,
        configuration: &Configuration,
        project_id: &str,
        sub_device: &SubDeviceDescriptor,
    ) -> Result<AssetId, PollError> {
        let parent_asset_id = self
            .registry
            .find_asset_id(configuration.id, project_id, &sub_device.parent_serial)
            .await?
            .ok_or_else(|| {
                PollError::NotFound(format!(
                    "parent asset {} in project {} for {}",
                    sub_device.parent_serial, project_id, sub_device.serial
                ))
            })?;
        let asset = AssetDescriptor::for_sub_device(sub_device);
        self.ensure_asset(configuration, project_id, &asset, Some(parent_asset_id))
            .await
    }

    /// 向一组资产写入同一组属性值。
    pub async fn push_data(
        &self,
        assets: &[ProjectAsset],
        subtype: DataSubtype,
        values: Vec<(&'static str, AttributeValue)>,
    ) -> Result<(), PollError> {
        for asset in assets {
            let data = AssetData::new(asset.asset_id, subtype).extend(values.iter().cloned());
            self.platform.upsert_data(&data).await?;
            record_data_pushed();
        }
        Ok(())
    }

    /// 写入设备描述信息（`info` 子类型）。
    pub async fn push_device_info(
        &self,
        assets: &[ProjectAsset],
        device: &DeviceDescriptor,
    ) -> Result<(), PollError> {
        self.push_data(assets, DataSubtype::Info, device_info_attributes(device))
            .await
    }
}

/// 设备描述信息属性。
pub fn device_info_attributes(device: &DeviceDescriptor) -> Vec<(&'static str, AttributeValue)> {
    let mut values = vec![
        ("name", AttributeValue::String(device.name.clone())),
        ("ip_address", AttributeValue::String(device.ip_address.clone())),
        ("mac_address", AttributeValue::String(device.mac_address.clone())),
        ("serial", AttributeValue::String(device.serial.clone())),
        ("firmware", AttributeValue::String(device.version.firmware.clone())),
    ];
    match &device.role {
        DeviceRole::Master => values.push(("role", AttributeValue::String("master".to_string()))),
        DeviceRole::Slave { master_ip } => {
            values.push(("role", AttributeValue::String("slave".to_string())));
            values.push(("master_ip", AttributeValue::String(master_ip.clone())));
        }
    }
    values
}
