use std::fmt;

/// 资产平台中的资产 ID。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub i32);

impl AssetId {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 属性值的数据类型。
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    I64(i64),
    F64(f64),
    Bool(bool),
    String(String),
}

/// 多功能传感器读数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiSensorReading {
    pub humidity: f64,
    pub air_quality: f64,
    pub co2: f64,
    pub temperature: f64,
}

impl MultiSensorReading {
    /// 按平台属性名展开。
    pub fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        vec![
            ("humidity", AttributeValue::F64(self.humidity)),
            ("air_quality", AttributeValue::F64(self.air_quality)),
            ("co2", AttributeValue::F64(self.co2)),
            ("temperature", AttributeValue::F64(self.temperature)),
        ]
    }
}

/// 门锁读数（门磁状态）。
#[derive(Debug, Clone, PartialEq)]
pub struct DoorReading {
    pub serial: String,
    pub door_contact: i64,
}

impl DoorReading {
    pub fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        vec![("door_contact", AttributeValue::I64(self.door_contact))]
    }
}
