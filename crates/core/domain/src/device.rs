//! 设备描述：每个轮询周期从设备根接口重新获取，不直接持久化。

/// 报警主机资产类型。
pub const ALARM_MANAGER_ASSET_TYPE: &str = "kentix_alarm_manager";
/// 门禁控制器资产类型。
pub const ACCESS_MANAGER_ASSET_TYPE: &str = "kentix_access_manager";
/// 多功能传感器资产类型。
pub const MULTI_SENSOR_ASSET_TYPE: &str = "kentix_multi_sensor";
/// 门锁（门禁控制器下的子设备）资产类型。
pub const DOORLOCK_ASSET_TYPE: &str = "kentix_doorlock";

/// 设备分类。
///
/// 只通过 [`DeviceClass::from_type_code`] 的精确映射表得到，
/// 未识别的类型码一律归为 `Unknown`，下游据此跳过该设备。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    AlarmManager,
    AccessController,
    MultiSensor,
    Unknown,
}

impl DeviceClass {
    pub fn from_type_code(code: i64) -> Self {
        match code {
            1 => Self::AlarmManager,
            2 => Self::AccessController,
            3 => Self::MultiSensor,
            _ => Self::Unknown,
        }
    }

    /// 对应的资产类型；`Unknown` 没有资产类型。
    pub fn asset_type(self) -> Option<&'static str> {
        match self {
            Self::AlarmManager => Some(ALARM_MANAGER_ASSET_TYPE),
            Self::AccessController => Some(ACCESS_MANAGER_ASSET_TYPE),
            Self::MultiSensor => Some(MULTI_SENSOR_ASSET_TYPE),
            Self::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlarmManager => "alarm_manager",
            Self::AccessController => "access_controller",
            Self::MultiSensor => "multi_sensor",
            Self::Unknown => "unknown",
        }
    }
}

/// 主从角色。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceRole {
    Master,
    Slave { master_ip: String },
}

/// 固件/子模块版本信息。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub firmware: String,
    pub atmel: String,
    pub fsm: String,
    pub gsm: String,
}

/// 设备根接口返回的设备描述。
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDescriptor {
    pub name: String,
    pub ip_address: String,
    pub mac_address: String,
    pub type_code: i64,
    /// 稳定的外部标识，每台物理设备唯一。
    pub serial: String,
    pub version: FirmwareVersion,
    pub class: DeviceClass,
    pub role: DeviceRole,
}

/// 子设备描述（如门禁控制器下的门锁）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDeviceDescriptor {
    pub serial: String,
    pub name: String,
    pub address: String,
    /// 父设备序列号，用于解析父资产。
    pub parent_serial: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_never_fall_through_to_known_class() {
        assert_eq!(DeviceClass::from_type_code(1), DeviceClass::AlarmManager);
        assert_eq!(DeviceClass::from_type_code(2), DeviceClass::AccessController);
        assert_eq!(DeviceClass::from_type_code(3), DeviceClass::MultiSensor);
        for code in [0, 4, -1, 99, i64::MAX] {
            assert_eq!(DeviceClass::from_type_code(code), DeviceClass::Unknown);
        }
        assert!(DeviceClass::Unknown.asset_type().is_none());
    }
}
