//! 资产平台 HTTP 客户端

use crate::error::PlatformError;
use crate::types::{AssetData, AssetUpsert};
use domain::AssetId;
use serde::Deserialize;
use std::time::Duration;

/// 资产平台
#[async_trait::async_trait]
pub trait AssetPlatform: Send + Sync {
    /// 创建或更新资产，返回平台资产 ID
    async fn upsert_asset(&self, asset: &AssetUpsert) -> Result<AssetId, PlatformError>;

    /// 写入某资产的最新属性值
    async fn upsert_data(&self, data: &AssetData) -> Result<(), PlatformError>;
}

/// 平台连接参数
#[derive(Debug, Clone)]
pub struct PlatformSettings {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct UpsertAssetResponse {
    id: i32,
}

/// 基于 reqwest 的平台客户端
#[derive(Clone)]
pub struct HttpAssetPlatform {
    http: reqwest::Client,
    settings: PlatformSettings,
}

impl HttpAssetPlatform {
    pub fn new(settings: PlatformSettings) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| PlatformError::Transport(err.to_string()))?;
        Ok(Self { http, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.endpoint.trim_end_matches('/'), path)
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.put(self.url(path));
        match &self.settings.token {
            Some(token) => request.header("X-API-Key", token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, PlatformError> {
        let response = request
            .send()
            .await
            .map_err(|err| PlatformError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PlatformError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl AssetPlatform for HttpAssetPlatform {
    async fn upsert_asset(&self, asset: &AssetUpsert) -> Result<AssetId, PlatformError> {
        let response = self.send(self.put("assets").json(asset)).await?;
        let body: UpsertAssetResponse = response
            .json()
            .await
            .map_err(|err| PlatformError::Decode(err.to_string()))?;
        tracing::debug!(
            target: "kx.platform",
            project_id = %asset.project_id,
            identifier = %asset.global_asset_identifier,
            asset_id = body.id,
            "asset_upserted"
        );
        Ok(AssetId(body.id))
    }

    async fn upsert_data(&self, data: &AssetData) -> Result<(), PlatformError> {
        self.send(self.put("data").json(&data.to_body())).await?;
        tracing::debug!(
            target: "kx.platform",
            asset_id = %data.asset_id,
            subtype = data.subtype.as_str(),
            values = data.values.len(),
            "data_upserted"
        );
        Ok(())
    }
}
