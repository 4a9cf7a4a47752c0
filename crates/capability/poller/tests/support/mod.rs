#![allow(dead_code)]

use async_trait::async_trait;
use domain::{
    AssetId, Configuration, DefaultOn, DeviceClass, DeviceDescriptor, DeviceRole, DoorReading,
    FirmwareVersion, MultiSensorReading, SubDeviceDescriptor,
};
use kx_device::{DeviceError, DeviceSource, DeviceTarget};
use kx_platform::{AssetData, AssetPlatform, AssetUpsert, PlatformError};
use kx_poller::{PollScheduler, SchedulerDeps};
use kx_storage::{
    AssetMappingRecord, AssetMappingStore, AssetMappingWriteResult, ConfigurationStore,
    InMemoryAssetMappingStore, InMemoryConfigurationStore, StorageError,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

pub const ACCESS_CONTROLLER: i64 = 2;
pub const MULTI_SENSOR: i64 = 3;

pub fn configuration(id: i64, address: &str, projects: &[&str]) -> Configuration {
    let mut config = Configuration::new(id, address);
    config.refresh_interval_secs = 30;
    config.request_timeout_secs = 5;
    config.enable = DefaultOn::set(true);
    config.active = DefaultOn::unset();
    config.project_ids = projects.iter().map(|p| p.to_string()).collect();
    config
}

pub fn device(type_code: i64, serial: &str, name: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        name: name.to_string(),
        ip_address: "10.0.0.5".to_string(),
        mac_address: "00:11:22:33:44:55".to_string(),
        type_code,
        serial: serial.to_string(),
        version: FirmwareVersion {
            firmware: "8.1.0".to_string(),
            ..FirmwareVersion::default()
        },
        class: DeviceClass::from_type_code(type_code),
        role: DeviceRole::Master,
    }
}

pub fn door(serial: &str, name: &str, parent_serial: &str) -> SubDeviceDescriptor {
    SubDeviceDescriptor {
        serial: serial.to_string(),
        name: name.to_string(),
        address: "1".to_string(),
        parent_serial: parent_serial.to_string(),
    }
}

/// 按地址返回预置设备的假设备源，记录每类调用次数。
#[derive(Default)]
pub struct FakeDevices {
    devices: Mutex<HashMap<String, Result<DeviceDescriptor, String>>>,
    doors: Mutex<HashMap<String, Vec<SubDeviceDescriptor>>>,
    pub device_calls: AtomicUsize,
    pub sub_device_calls: AtomicUsize,
    pub reading_calls: AtomicUsize,
}

impl FakeDevices {
    pub fn with_device(self, address: &str, device: DeviceDescriptor) -> Self {
        self.devices
            .lock()
            .unwrap()
            .insert(address.to_string(), Ok(device));
        self
    }

    pub fn with_unreachable(self, address: &str) -> Self {
        self.devices
            .lock()
            .unwrap()
            .insert(address.to_string(), Err("connection refused".to_string()));
        self
    }

    pub fn with_doors(self, address: &str, doors: Vec<SubDeviceDescriptor>) -> Self {
        self.doors
            .lock()
            .unwrap()
            .insert(address.to_string(), doors);
        self
    }

    pub fn device_calls(&self) -> usize {
        self.device_calls.load(Ordering::SeqCst)
    }

    pub fn sub_device_calls(&self) -> usize {
        self.sub_device_calls.load(Ordering::SeqCst)
    }

    pub fn reading_calls(&self) -> usize {
        self.reading_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceSource for FakeDevices {
    async fn fetch_device(&self, target: &DeviceTarget) -> Result<DeviceDescriptor, DeviceError> {
        self.device_calls.fetch_add(1, Ordering::SeqCst);
        match self.devices.lock().unwrap().get(&target.address) {
            Some(Ok(device)) => Ok(device.clone()),
            Some(Err(message)) => Err(DeviceError::Transport(message.clone())),
            None => Err(DeviceError::Transport(format!("no device at {}", target.address))),
        }
    }

    async fn fetch_sub_devices(
        &self,
        target: &DeviceTarget,
        _parent_serial: &str,
    ) -> Result<Vec<SubDeviceDescriptor>, DeviceError> {
        self.sub_device_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .doors
            .lock()
            .unwrap()
            .get(&target.address)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_multi_sensor_reading(
        &self,
        _target: &DeviceTarget,
    ) -> Result<MultiSensorReading, DeviceError> {
        self.reading_calls.fetch_add(1, Ordering::SeqCst);
        Ok(MultiSensorReading {
            humidity: 40.0,
            air_quality: 10.0,
            co2: 600.0,
            temperature: 21.5,
        })
    }

    async fn fetch_door_reading(
        &self,
        _target: &DeviceTarget,
        door_serial: &str,
    ) -> Result<DoorReading, DeviceError> {
        self.reading_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DoorReading {
            serial: door_serial.to_string(),
            door_contact: 1,
        })
    }
}

/// 记录所有 upsert 的假平台，资产 ID 从 100 递增分配。
pub struct RecordingPlatform {
    next_id: AtomicI32,
    pub upserts: Mutex<Vec<AssetUpsert>>,
    pub data: Mutex<Vec<AssetData>>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            next_id: AtomicI32::new(100),
            upserts: Mutex::new(Vec::new()),
            data: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingPlatform {
    pub fn upserts(&self) -> Vec<AssetUpsert> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn data(&self) -> Vec<AssetData> {
        self.data.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetPlatform for RecordingPlatform {
    async fn upsert_asset(&self, asset: &AssetUpsert) -> Result<AssetId, PlatformError> {
        self.upserts.lock().unwrap().push(asset.clone());
        Ok(AssetId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn upsert_data(&self, data: &AssetData) -> Result<(), PlatformError> {
        self.data.lock().unwrap().push(data.clone());
        Ok(())
    }
}

/// 查询正常、写入总是失败的映射存储。
#[derive(Default)]
pub struct FailingMappingStore;

#[async_trait]
impl AssetMappingStore for FailingMappingStore {
    async fn find_asset_mapping(
        &self,
        _configuration_id: i64,
        _project_id: &str,
        _identifier: &str,
    ) -> Result<Option<AssetMappingRecord>, StorageError> {
        Ok(None)
    }

    async fn insert_asset_mapping(
        &self,
        _record: AssetMappingRecord,
    ) -> Result<AssetMappingWriteResult, StorageError> {
        Err(StorageError::new("disk full"))
    }

    async fn replace_asset_mapping(
        &self,
        _record: AssetMappingRecord,
    ) -> Result<Option<AssetId>, StorageError> {
        Err(StorageError::new("disk full"))
    }

    async fn list_asset_mappings(
        &self,
        _configuration_id: i64,
    ) -> Result<Vec<AssetMappingRecord>, StorageError> {
        Ok(Vec::new())
    }
}

/// 读取正常、`active` 写入总是失败的配置存储。
pub struct FailingActivationStore {
    inner: InMemoryConfigurationStore,
}

impl FailingActivationStore {
    pub fn new(configurations: Vec<Configuration>) -> Self {
        Self {
            inner: InMemoryConfigurationStore::with_configurations(configurations),
        }
    }
}

#[async_trait]
impl ConfigurationStore for FailingActivationStore {
    async fn list_configurations(&self) -> Result<Vec<Configuration>, StorageError> {
        self.inner.list_configurations().await
    }

    async fn find_configuration(&self, id: i64) -> Result<Option<Configuration>, StorageError> {
        self.inner.find_configuration(id).await
    }

    async fn set_active(&self, _id: i64, _active: bool) -> Result<u64, StorageError> {
        Err(StorageError::new("connection reset"))
    }

    async fn set_all_inactive(&self) -> Result<u64, StorageError> {
        Err(StorageError::new("connection reset"))
    }
}

pub struct Harness {
    pub scheduler: PollScheduler,
    pub configurations: Arc<InMemoryConfigurationStore>,
    pub mappings: Arc<InMemoryAssetMappingStore>,
    pub devices: Arc<FakeDevices>,
    pub platform: Arc<RecordingPlatform>,
}

/// 使用自定义配置存储构建调度器。
pub fn scheduler_with(
    configurations: Arc<dyn ConfigurationStore>,
    devices: Arc<FakeDevices>,
    platform: Arc<RecordingPlatform>,
) -> PollScheduler {
    PollScheduler::new(SchedulerDeps {
        configurations,
        asset_mappings: Arc::new(InMemoryAssetMappingStore::new()),
        devices,
        platform,
    })
}

pub fn harness(configurations: Vec<Configuration>, devices: FakeDevices) -> Harness {
    let configurations = Arc::new(InMemoryConfigurationStore::with_configurations(
        configurations,
    ));
    let mappings = Arc::new(InMemoryAssetMappingStore::new());
    let devices = Arc::new(devices);
    let platform = Arc::new(RecordingPlatform::default());
    let scheduler = PollScheduler::new(SchedulerDeps {
        configurations: configurations.clone(),
        asset_mappings: mappings.clone(),
        devices: devices.clone(),
        platform: platform.clone(),
    });
    Harness {
        scheduler,
        configurations,
        mappings,
        devices,
        platform,
    }
}
