use domain::{AssetId, Configuration, DefaultOn};
use kx_storage::{
    AssetMappingRecord, AssetMappingStore, ConfigurationStore, InMemoryAssetMappingStore,
    InMemoryConfigurationStore, StorageErrorKind,
};

fn configuration(id: i64) -> Configuration {
    let mut config = Configuration::new(id, format!("http://10.0.0.{}", id));
    config.project_ids = vec!["1".to_string()];
    config
}

#[tokio::test]
async fn configurations_are_listed_in_id_order() {
    let store = InMemoryConfigurationStore::with_configurations(vec![
        configuration(3),
        configuration(1),
        configuration(2),
    ]);

    let ids: Vec<i64> = store
        .list_configurations()
        .await
        .expect("list")
        .iter()
        .map(|config| config.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(store.find_configuration(4).await.expect("find").is_none());
}

#[tokio::test]
async fn set_active_reports_rows_affected() {
    let store = InMemoryConfigurationStore::with_configurations(vec![configuration(1)]);

    assert_eq!(store.set_active(1, false).await.expect("set"), 1);
    assert_eq!(store.set_active(9, false).await.expect("set missing"), 0);
    assert_eq!(store.active_writes(), 1);

    let config = store.find_configuration(1).await.expect("find").expect("exists");
    assert_eq!(config.active, DefaultOn::set(false));
}

#[tokio::test]
async fn set_all_inactive_touches_every_configuration() {
    let store =
        InMemoryConfigurationStore::with_configurations(vec![configuration(1), configuration(2)]);

    assert_eq!(store.set_all_inactive().await.expect("reset"), 2);
    for config in store.list_configurations().await.expect("list") {
        assert!(!config.is_active());
    }
}

#[tokio::test]
async fn asset_mapping_insert_is_idempotent_per_key() {
    let store = InMemoryAssetMappingStore::new();
    let record = AssetMappingRecord::new(1, "p1", "AC-1", AssetId(10));

    let first = store
        .insert_asset_mapping(record.clone())
        .await
        .expect("insert");
    assert!(first.inserted);

    let second = store
        .insert_asset_mapping(record)
        .await
        .expect("insert again");
    assert!(!second.inserted);
    assert_eq!(second.record.asset_id, AssetId(10));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn asset_mapping_with_other_asset_id_conflicts() {
    let store = InMemoryAssetMappingStore::new();
    store
        .insert_asset_mapping(AssetMappingRecord::new(1, "p1", "AC-1", AssetId(10)))
        .await
        .expect("insert");

    let err = store
        .insert_asset_mapping(AssetMappingRecord::new(1, "p1", "AC-1", AssetId(11)))
        .await
        .expect_err("conflict");
    assert_eq!(err.kind(), StorageErrorKind::Conflict);

    let previous = store
        .replace_asset_mapping(AssetMappingRecord::new(1, "p1", "AC-1", AssetId(11)))
        .await
        .expect("replace");
    assert_eq!(previous, Some(AssetId(10)));

    let found = store
        .find_asset_mapping(1, "p1", "AC-1")
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(found.asset_id, AssetId(11));
}

#[tokio::test]
async fn asset_mappings_are_scoped_by_configuration_and_project() {
    let store = InMemoryAssetMappingStore::new();
    for record in [
        AssetMappingRecord::new(1, "p2", "AC-1", AssetId(20)),
        AssetMappingRecord::new(1, "p1", "AC-1", AssetId(10)),
        AssetMappingRecord::new(2, "p1", "AC-1", AssetId(30)),
    ] {
        store.insert_asset_mapping(record).await.expect("insert");
    }

    let listed = store.list_asset_mappings(1).await.expect("list");
    let assets: Vec<AssetId> = listed.iter().map(|item| item.asset_id).collect();
    assert_eq!(assets, vec![AssetId(10), AssetId(20)]);
    assert!(
        store
            .find_asset_mapping(2, "p2", "AC-1")
            .await
            .expect("find")
            .is_none()
    );
}
