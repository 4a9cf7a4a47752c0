//! Postgres 配置存储实现

use crate::error::StorageError;
use crate::traits::ConfigurationStore;
use domain::{Configuration, DefaultOn};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const SELECT_COLUMNS: &str = "select id, address, api_key, enable, refresh_interval, \
     request_timeout, active, project_ids from configuration";

pub struct PgConfigurationStore {
    pub pool: PgPool,
}

impl PgConfigurationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn configuration_from_row(row: &PgRow) -> Result<Configuration, StorageError> {
    let refresh_interval: i32 = row.try_get("refresh_interval")?;
    let request_timeout: i32 = row.try_get("request_timeout")?;
    let address: Option<String> = row.try_get("address")?;
    let api_key: Option<String> = row.try_get("api_key")?;
    let project_ids: Option<Vec<String>> = row.try_get("project_ids")?;
    Ok(Configuration {
        id: row.try_get("id")?,
        address: address.unwrap_or_default(),
        api_key: api_key.unwrap_or_default(),
        enable: DefaultOn::new(row.try_get("enable")?),
        refresh_interval_secs: refresh_interval.max(0) as u64,
        request_timeout_secs: request_timeout.max(0) as u64,
        active: DefaultOn::new(row.try_get("active")?),
        project_ids: project_ids.unwrap_or_default(),
    })
}

#[async_trait::async_trait]
impl ConfigurationStore for PgConfigurationStore {
    async fn list_configurations(&self) -> Result<Vec<Configuration>, StorageError> {
        let rows = sqlx::query(&format!("{} order by id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(configuration_from_row).collect()
    }

    async fn find_configuration(&self, id: i64) -> Result<Option<Configuration>, StorageError> {
        let row = sqlx::query(&format!("{} where id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        configuration_from_row(&row).map(Some)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<u64, StorageError> {
        let result = sqlx::query("update configuration set active = $1 where id = $2")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn set_all_inactive(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("update configuration set active = false")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
