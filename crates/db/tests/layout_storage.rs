use std::sync::Arc;

use academia_core::layout::{
    default_dashboard_layout, LayoutKey, LayoutStorage, LayoutStore, CURRENT_LAYOUT_VERSION,
};
use academia_core::roles::Role;
use academia_db::repositories::DashboardLayoutRepo;
use academia_db::PgLayoutStorage;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check(pool: PgPool) {
    academia_db::health_check(&pool).await.unwrap();
    PgLayoutStorage::new(pool).health_check().await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_key_loads_as_none(pool: PgPool) {
    let storage = PgLayoutStorage::new(pool);
    let key = LayoutKey::new(1, 1, Role::Student);
    assert!(storage.load(&key).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_store_then_load_round_trips(pool: PgPool) {
    let storage = PgLayoutStorage::new(pool.clone());
    let key = LayoutKey::new(4, 12, Role::Coordinator);
    let state = default_dashboard_layout(Role::Coordinator);
    storage.store(&key, &state).await.unwrap();

    let loaded = storage.load(&key).await.unwrap().unwrap();
    assert_eq!(loaded, state);

    let row = DashboardLayoutRepo::find_by_key(&pool, "4:12:coordinator")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.role, "coordinator");
    assert_eq!(row.tenant_id, 4);
    assert_eq!(row.state_json["version"], CURRENT_LAYOUT_VERSION);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_keeps_one_row_per_key(pool: PgPool) {
    let store = LayoutStore::new(Arc::new(PgLayoutStorage::new(pool.clone())));
    let key = LayoutKey::new(2, 8, Role::Advisor);

    let mut state = store.get_or_create_layout(&key).await.unwrap();
    state.enabled_widget_ids.retain(|id| id != "calendar");
    state.layouts.retain_ids(|id| id != "calendar");
    let saved = store.save_layout(&key, state).await.unwrap();

    // Same key under another role is a separate row.
    store
        .get_or_create_layout(&LayoutKey::new(2, 8, Role::Student))
        .await
        .unwrap();

    assert_eq!(DashboardLayoutRepo::count_for_user(&pool, 2, 8).await.unwrap(), 2);
    assert_eq!(store.get_or_create_layout(&key).await.unwrap(), saved);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unreadable_document_is_replaced_by_default(pool: PgPool) {
    sqlx::query(
        "INSERT INTO dashboard_layouts (storage_key, tenant_id, user_id, role, state_json) \
         VALUES ('1:3:student', 1, 3, 'student', '{\"version\": \"bogus\"}'::jsonb)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = LayoutStore::new(Arc::new(PgLayoutStorage::new(pool)));
    let state = store
        .get_or_create_layout(&LayoutKey::new(1, 3, Role::Student))
        .await
        .unwrap();
    assert!(state.same_content(&default_dashboard_layout(Role::Student)));
}
