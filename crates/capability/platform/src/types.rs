//! 平台请求模型

use domain::{AssetId, AttributeValue};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// 资产 upsert 请求
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpsert {
    pub project_id: String,
    /// 平台内的全局标识（设备/门锁序列号）
    pub global_asset_identifier: String,
    pub name: String,
    pub asset_type: String,
    pub description: String,
    #[serde(
        rename = "parentFunctionalAssetId",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_asset_id"
    )]
    pub parent_asset_id: Option<AssetId>,
}

fn serialize_asset_id<S>(value: &Option<AssetId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(id) => serializer.serialize_some(&id.value()),
        None => serializer.serialize_none(),
    }
}

/// 数据子类型：实时读数或描述信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubtype {
    Input,
    Info,
}

impl DataSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Info => "info",
        }
    }
}

/// 一次数据写入：某资产的一组属性值
#[derive(Debug, Clone, PartialEq)]
pub struct AssetData {
    pub asset_id: AssetId,
    pub subtype: DataSubtype,
    pub values: BTreeMap<String, AttributeValue>,
}

impl AssetData {
    pub fn new(asset_id: AssetId, subtype: DataSubtype) -> Self {
        Self {
            asset_id,
            subtype,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn extend<'a>(
        mut self,
        values: impl IntoIterator<Item = (&'a str, AttributeValue)>,
    ) -> Self {
        for (name, value) in values {
            self.values.insert(name.to_string(), value);
        }
        self
    }

    /// 平台写入报文：`{ assetId, subtype, data: { name: value } }`
    pub fn to_body(&self) -> Value {
        let data: Map<String, Value> = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), attribute_to_json(value)))
            .collect();
        serde_json::json!({
            "assetId": self.asset_id.value(),
            "subtype": self.subtype.as_str(),
            "data": data,
        })
    }
}

fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::I64(v) => Value::from(*v),
        // NaN/inf 无法表达为 JSON，写成 null
        AttributeValue::F64(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
        AttributeValue::Bool(v) => Value::Bool(*v),
        AttributeValue::String(v) => Value::String(v.clone()),
    }
}
