pub mod configuration;
pub mod data;
pub mod device;

pub use configuration::{Configuration, DefaultOn};
pub use data::{AssetId, AttributeValue, DoorReading, MultiSensorReading};
pub use device::{
    ACCESS_MANAGER_ASSET_TYPE, ALARM_MANAGER_ASSET_TYPE, DOORLOCK_ASSET_TYPE, DeviceClass,
    DeviceDescriptor, DeviceRole, FirmwareVersion, MULTI_SENSOR_ASSET_TYPE, SubDeviceDescriptor,
};
