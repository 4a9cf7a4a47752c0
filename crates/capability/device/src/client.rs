//! 设备 HTTP 客户端

use crate::error::DeviceError;
use crate::types::{
    DOORLOCKS_PATH, DeviceInfoPayload, DeviceTarget, DoorStatePayload, DoorlockPayload, Envelope,
    INFO_PATH, SENSORS_PATH, SensorPayload,
};
use domain::{DeviceDescriptor, DoorReading, MultiSensorReading, SubDeviceDescriptor};
use serde::de::DeserializeOwned;

/// 设备数据源
///
/// 调度器只依赖该 trait；测试中以内存假实现替换。
#[async_trait::async_trait]
pub trait DeviceSource: Send + Sync {
    /// 读取设备根接口，得到设备描述
    async fn fetch_device(&self, target: &DeviceTarget) -> Result<DeviceDescriptor, DeviceError>;

    /// 列出父设备下的子设备（门锁）
    async fn fetch_sub_devices(
        &self,
        target: &DeviceTarget,
        parent_serial: &str,
    ) -> Result<Vec<SubDeviceDescriptor>, DeviceError>;

    /// 读取多功能传感器当前读数
    async fn fetch_multi_sensor_reading(
        &self,
        target: &DeviceTarget,
    ) -> Result<MultiSensorReading, DeviceError>;

    /// 读取单个门锁的门磁状态
    async fn fetch_door_reading(
        &self,
        target: &DeviceTarget,
        door_serial: &str,
    ) -> Result<DoorReading, DeviceError>;
}

/// 基于 reqwest 的设备客户端
///
/// 连接池在所有配置间共享，超时按请求设置。
#[derive(Clone, Default)]
pub struct HttpDeviceClient {
    http: reqwest::Client,
}

impl HttpDeviceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        target: &DeviceTarget,
        path: &str,
    ) -> Result<T, DeviceError> {
        let url = target.url(path);
        let mut request = self.http.get(&url).timeout(target.timeout);
        if let Some(api_key) = &target.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| DeviceError::Transport(format!("GET {url}: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeviceError::Transport(format!(
                "GET {url}: unexpected status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| DeviceError::Transport(format!("GET {url}: {err}")))?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|err| DeviceError::Decode(format!("GET {url}: {err}")))?;
        tracing::debug!(target: "kx.device", url = %url, "device_response_decoded");
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl DeviceSource for HttpDeviceClient {
    async fn fetch_device(&self, target: &DeviceTarget) -> Result<DeviceDescriptor, DeviceError> {
        let payload: DeviceInfoPayload = self.get_data(target, INFO_PATH).await?;
        Ok(payload.into())
    }

    async fn fetch_sub_devices(
        &self,
        target: &DeviceTarget,
        parent_serial: &str,
    ) -> Result<Vec<SubDeviceDescriptor>, DeviceError> {
        let payload: Vec<DoorlockPayload> = self.get_data(target, DOORLOCKS_PATH).await?;
        Ok(payload
            .into_iter()
            .map(|door| door.into_descriptor(parent_serial))
            .collect())
    }

    async fn fetch_multi_sensor_reading(
        &self,
        target: &DeviceTarget,
    ) -> Result<MultiSensorReading, DeviceError> {
        let payload: SensorPayload = self.get_data(target, SENSORS_PATH).await?;
        Ok(payload.into())
    }

    async fn fetch_door_reading(
        &self,
        target: &DeviceTarget,
        door_serial: &str,
    ) -> Result<DoorReading, DeviceError> {
        let path = format!("{DOORLOCKS_PATH}/{door_serial}");
        let payload: DoorStatePayload = self.get_data(target, &path).await?;
        Ok(payload.into_reading(door_serial))
    }
}
