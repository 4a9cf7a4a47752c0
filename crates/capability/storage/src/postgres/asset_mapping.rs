//! Postgres 资产映射存储实现
//!
//! 依赖 `(configuration_id, project_id, identifier)` 唯一约束保证每个键至多一条映射。

use crate::error::StorageError;
use crate::models::{AssetMappingRecord, AssetMappingWriteResult};
use crate::traits::AssetMappingStore;
use domain::AssetId;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgAssetMappingStore {
    pub pool: PgPool,
}

impl PgAssetMappingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn mapping_from_row(row: &PgRow) -> Result<AssetMappingRecord, StorageError> {
    Ok(AssetMappingRecord {
        configuration_id: row.try_get("configuration_id")?,
        project_id: row.try_get("project_id")?,
        identifier: row.try_get("identifier")?,
        asset_id: AssetId(row.try_get("asset_id")?),
    })
}

#[async_trait::async_trait]
impl AssetMappingStore for PgAssetMappingStore {
    async fn find_asset_mapping(
        &self,
        configuration_id: i64,
        project_id: &str,
        identifier: &str,
    ) -> Result<Option<AssetMappingRecord>, StorageError> {
        let row = sqlx::query(
            "select configuration_id, project_id, identifier, asset_id from asset_mapping \
             where configuration_id = $1 and project_id = $2 and identifier = $3",
        )
        .bind(configuration_id)
        .bind(project_id)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        mapping_from_row(&row).map(Some)
    }

    async fn insert_asset_mapping(
        &self,
        record: AssetMappingRecord,
    ) -> Result<AssetMappingWriteResult, StorageError> {
        let inserted = sqlx::query(
            "insert into asset_mapping (configuration_id, project_id, identifier, asset_id) \
             values ($1, $2, $3, $4) \
             on conflict (configuration_id, project_id, identifier) do nothing",
        )
        .bind(record.configuration_id)
        .bind(&record.project_id)
        .bind(&record.identifier)
        .bind(record.asset_id.value())
        .execute(&self.pool)
        .await?
        .rows_affected()
            > 0;
        if inserted {
            return Ok(AssetMappingWriteResult {
                record,
                inserted: true,
            });
        }
        let existing = self
            .find_asset_mapping(
                record.configuration_id,
                &record.project_id,
                &record.identifier,
            )
            .await?
            .ok_or_else(|| StorageError::new("asset mapping vanished after conflict"))?;
        if existing.asset_id != record.asset_id {
            return Err(StorageError::conflict(format!(
                "asset mapping exists for {}/{}/{} with asset {}",
                existing.configuration_id,
                existing.project_id,
                existing.identifier,
                existing.asset_id
            )));
        }
        Ok(AssetMappingWriteResult {
            record: existing,
            inserted: false,
        })
    }

    async fn replace_asset_mapping(
        &self,
        record: AssetMappingRecord,
    ) -> Result<Option<AssetId>, StorageError> {
        let row = sqlx::query(
            "with previous as ( \
                 select asset_id from asset_mapping \
                 where configuration_id = $1 and project_id = $2 and identifier = $3 \
             ), upserted as ( \
                 insert into asset_mapping (configuration_id, project_id, identifier, asset_id) \
                 values ($1, $2, $3, $4) \
                 on conflict (configuration_id, project_id, identifier) \
                 do update set asset_id = excluded.asset_id \
                 returning asset_id \
             ) \
             select (select asset_id from previous) as previous_asset_id",
        )
        .bind(record.configuration_id)
        .bind(&record.project_id)
        .bind(&record.identifier)
        .bind(record.asset_id.value())
        .fetch_one(&self.pool)
        .await?;
        let previous: Option<i32> = row.try_get("previous_asset_id")?;
        Ok(previous.map(AssetId))
    }

    async fn list_asset_mappings(
        &self,
        configuration_id: i64,
    ) -> Result<Vec<AssetMappingRecord>, StorageError> {
        let rows = sqlx::query(
            "select configuration_id, project_id, identifier, asset_id from asset_mapping \
             where configuration_id = $1 order by project_id, identifier",
        )
        .bind(configuration_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(mapping_from_row).collect()
    }
}
