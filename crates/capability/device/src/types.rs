//! 设备 API 报文结构与请求目标

use domain::{
    Configuration, DeviceClass, DeviceDescriptor, DeviceRole, DoorReading, FirmwareVersion,
    MultiSensorReading, SubDeviceDescriptor,
};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// 根接口路径（设备信息）
pub const INFO_PATH: &str = "api/info";
/// 门禁控制器门锁列表路径
pub const DOORLOCKS_PATH: &str = "api/doorlocks";
/// 多功能传感器读数路径
pub const SENSORS_PATH: &str = "api/sensors";

/// 一次设备请求的目标：基础地址、凭据与超时。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTarget {
    pub address: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl DeviceTarget {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            api_key: None,
            timeout,
        }
    }

    /// 由配置构造（超时至少 1 秒，空 API Key 视为未配置）。
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let api_key = Some(configuration.api_key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Self {
            address: configuration.address.clone(),
            api_key,
            timeout: Duration::from_secs(configuration.request_timeout_secs()),
        }
    }

    /// 拼接子路径，忽略多余的 `/`。
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.address.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// 设备 API 的统一外层结构：`{ "data": ... }`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceInfoPayload {
    pub name: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(rename = "type")]
    pub type_code: i64,
    pub serial: String,
    #[serde(default)]
    pub version: VersionPayload,
    #[serde(default)]
    pub masterslave: MasterSlavePayload,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VersionPayload {
    #[serde(default)]
    pub firmware: String,
    #[serde(default)]
    pub atmel: String,
    #[serde(default)]
    pub fsm: String,
    #[serde(default)]
    pub gsm: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MasterSlavePayload {
    #[serde(default)]
    pub is_slave: bool,
    #[serde(default)]
    pub master_ip: String,
}

impl From<DeviceInfoPayload> for DeviceDescriptor {
    fn from(payload: DeviceInfoPayload) -> Self {
        let role = if payload.masterslave.is_slave {
            DeviceRole::Slave {
                master_ip: payload.masterslave.master_ip,
            }
        } else {
            DeviceRole::Master
        };
        DeviceDescriptor {
            name: payload.name,
            ip_address: payload.ip_address,
            mac_address: payload.mac_address,
            type_code: payload.type_code,
            serial: payload.serial,
            version: FirmwareVersion {
                firmware: payload.version.firmware,
                atmel: payload.version.atmel,
                fsm: payload.version.fsm,
                gsm: payload.version.gsm,
            },
            class: DeviceClass::from_type_code(payload.type_code),
            role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DoorlockPayload {
    pub serial: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl DoorlockPayload {
    pub fn into_descriptor(self, parent_serial: &str) -> SubDeviceDescriptor {
        SubDeviceDescriptor {
            serial: self.serial,
            name: self.name,
            address: self.address,
            parent_serial: parent_serial.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DoorStatePayload {
    #[serde(deserialize_with = "int_or_bool")]
    pub door_contact: i64,
}

impl DoorStatePayload {
    pub fn into_reading(self, serial: &str) -> DoorReading {
        DoorReading {
            serial: serial.to_string(),
            door_contact: self.door_contact,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SensorPayload {
    pub humidity: f64,
    pub air_quality: f64,
    pub co2: f64,
    pub temperature: f64,
}

impl From<SensorPayload> for MultiSensorReading {
    fn from(payload: SensorPayload) -> Self {
        MultiSensorReading {
            humidity: payload.humidity,
            air_quality: payload.air_quality,
            co2: payload.co2,
            temperature: payload.temperature,
        }
    }
}

/// 门磁状态兼容 `0/1` 与 `false/true` 两种写法。
fn int_or_bool<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Int(i64),
        Bool(bool),
    }

    Ok(match IntOrBool::deserialize(deserializer)? {
        IntOrBool::Int(value) => value,
        IntOrBool::Bool(value) => i64::from(value),
    })
}
