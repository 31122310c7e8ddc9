//! Repository integration tests against an in-memory SQLite database.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use inventory_server::db::models::{
    CatalogCreate, CatalogSection, CategoryCreate, MovementCreate, MovementKind, ProductCreate,
    ProductKind, ProductUpdate, StoreCreate, UnitCreate,
};
use inventory_server::db::repository::{
    RepoError, catalog, category, movement, product, store, store_product, unit,
};
use inventory_server::pricing::WholesaleTier;

async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

async fn seed_refs(pool: &SqlitePool) -> (i64, i64) {
    let u = unit::create(
        pool,
        UnitCreate {
            name: "Kilogramo".into(),
            abbreviation: "kg".into(),
            description: None,
            factor: Some(1000.0),
        },
    )
    .await
    .unwrap();
    let c = category::create(
        pool,
        CategoryCreate {
            name: "Panes".into(),
            description: None,
            is_public: Some(true),
        },
    )
    .await
    .unwrap();
    (u.id, c.id)
}

fn product_create(name: &str, kind: ProductKind, unit_id: i64) -> ProductCreate {
    ProductCreate {
        name: name.into(),
        description: None,
        kind,
        unit_id,
        category_id: None,
        standard_weight_grams: 0.0,
        net_weight: 0.0,
        stock: 0.0,
        min_stock: 0.0,
        price: 1.0,
        distributor_price: 0.0,
        tax_rate: 0.0,
        sku: None,
        barcode: None,
        wholesale_rules: None,
        primary_image_url: None,
        is_active: true,
    }
}

fn store_create(name: &str, position: i64) -> StoreCreate {
    StoreCreate {
        name: name.into(),
        address: "Av. Principal 123".into(),
        description: None,
        image_url: None,
        phone: None,
        email: None,
        city: Some("Quito".into()),
        province: None,
        latitude: None,
        longitude: None,
        position: Some(position),
        created_by: None,
    }
}

// ========================================================================
// Products
// ========================================================================

#[tokio::test]
async fn products_listed_final_then_intermediate_then_raw() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;

    // Insertion order: raw A, final B, intermediate C, final D
    let a = product::create(&pool, product_create("A", ProductKind::Raw, unit_id))
        .await
        .unwrap();
    let b = product::create(&pool, product_create("B", ProductKind::Final, unit_id))
        .await
        .unwrap();
    let c = product::create(&pool, product_create("C", ProductKind::Intermediate, unit_id))
        .await
        .unwrap();
    let d = product::create(&pool, product_create("D", ProductKind::Final, unit_id))
        .await
        .unwrap();

    let listed = product::find_all(&pool).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.product.id).collect();
    assert_eq!(ids, vec![b.id, d.id, c.id, a.id]);
}

#[tokio::test]
async fn product_list_includes_category_and_unit_names() {
    let pool = test_pool().await;
    let (unit_id, category_id) = seed_refs(&pool).await;

    let mut create = product_create("Pan de agua", ProductKind::Final, unit_id);
    create.category_id = Some(category_id);
    product::create(&pool, create).await.unwrap();

    let listed = product::find_all(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category_name.as_deref(), Some("Panes"));
    assert_eq!(listed[0].unit_name.as_deref(), Some("Kilogramo"));
    assert_eq!(listed[0].unit_abbreviation.as_deref(), Some("kg"));
}

#[tokio::test]
async fn wholesale_rules_round_trip() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;

    let mut create = product_create("Harina", ProductKind::Raw, unit_id);
    create.wholesale_rules = Some(vec![WholesaleTier {
        min_qty: Some(5.0),
        discount_percent: Some(10.0),
        price_per_unit: None,
    }]);
    let created = product::create(&pool, create).await.unwrap();

    let read = product::find_by_id(&pool, created.id).await.unwrap().unwrap();
    let rules = read.product.wholesale_rules.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].min_qty, Some(5.0));
    assert_eq!(rules[0].discount_percent, Some(10.0));
    assert_eq!(rules[0].price_per_unit, None);
}

#[tokio::test]
async fn update_can_clear_wholesale_rules() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;

    let mut create = product_create("Azúcar", ProductKind::Raw, unit_id);
    create.wholesale_rules = Some(vec![WholesaleTier {
        min_qty: Some(10.0),
        discount_percent: None,
        price_per_unit: Some(0.9),
    }]);
    let created = product::create(&pool, create).await.unwrap();

    let updated = product::update(
        &pool,
        created.id,
        ProductUpdate {
            wholesale_rules: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.wholesale_rules, None);

    // An untouched update leaves other fields alone
    let untouched = product::update(
        &pool,
        created.id,
        ProductUpdate {
            price: Some(2.5),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(untouched.price, 2.5);
    assert_eq!(untouched.name, "Azúcar");
}

#[tokio::test]
async fn missing_product_is_not_found_not_a_database_error() {
    let pool = test_pool().await;

    assert!(product::find_by_id(&pool, 9999).await.unwrap().is_none());

    let err = product::update(&pool, 9999, ProductUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn create_rejects_dangling_unit_reference() {
    let pool = test_pool().await;
    let err = product::create(&pool, product_create("X", ProductKind::Raw, 4242))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

// ========================================================================
// Image reference guard
// ========================================================================

#[tokio::test]
async fn image_reference_counting_excludes_the_mutated_row() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;

    let mut first = product_create("Con imagen", ProductKind::Final, unit_id);
    first.primary_image_url = Some("shared.jpg".into());
    let first = product::create(&pool, first).await.unwrap();

    let mut second = product_create("Misma imagen", ProductKind::Final, unit_id);
    second.primary_image_url = Some("shared.jpg".into());
    let second = product::create(&pool, second).await.unwrap();

    // From either row's perspective there is one other reference
    assert_eq!(
        product::count_image_refs(&pool, "shared.jpg", Some(first.id))
            .await
            .unwrap(),
        1
    );

    // Drop the second reference; the first row is now the only one
    product::update(
        &pool,
        second.id,
        ProductUpdate {
            primary_image_url: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(
        product::count_image_refs(&pool, "shared.jpg", Some(first.id))
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        product::count_image_refs(&pool, "shared.jpg", None)
            .await
            .unwrap(),
        1
    );
}

// ========================================================================
// Store placements
// ========================================================================

#[tokio::test]
async fn placement_add_is_idempotent() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    let p = product::create(&pool, product_create("Torta", ProductKind::Final, unit_id))
        .await
        .unwrap();
    let s = store::create(&pool, store_create("Centro", 0)).await.unwrap();

    let first = store_product::find_or_create(&pool, s.id, p.id).await.unwrap();
    let second = store_product::find_or_create(&pool, s.id, p.id).await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(second.is_active);

    // Deactivated placements are re-activated, not duplicated
    store_product::set_active(&pool, s.id, p.id, false).await.unwrap();
    let third = store_product::find_or_create(&pool, s.id, p.id).await.unwrap();
    assert_eq!(third.id, first.id);
    assert!(third.is_active);

    let rows = store_product::find_by_store(&pool, s.id, false, "").await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn placement_listing_filters_and_search() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    let s = store::create(&pool, store_create("Norte", 0)).await.unwrap();

    let cake = product::create(
        &pool,
        product_create("Chocolate Cake", ProductKind::Final, unit_id),
    )
    .await
    .unwrap();
    let flour = product::create(&pool, product_create("Flour", ProductKind::Raw, unit_id))
        .await
        .unwrap();
    let mut inactive = product_create("Hidden Cake", ProductKind::Final, unit_id);
    inactive.is_active = false;
    let inactive = product::create(&pool, inactive).await.unwrap();

    for id in [cake.id, flour.id, inactive.id] {
        store_product::find_or_create(&pool, s.id, id).await.unwrap();
    }

    // Raw and inactive products never appear, regardless of their placement
    let all = store_product::find_by_store(&pool, s.id, true, "").await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].product.name, "Chocolate Cake");
    assert_eq!(all[0].product.unit.as_deref(), Some("kg"));

    // Case-insensitive substring search
    let hits = store_product::find_by_store(&pool, s.id, true, "CHOCO").await.unwrap();
    assert_eq!(hits.len(), 1);
    let misses = store_product::find_by_store(&pool, s.id, true, "croissant").await.unwrap();
    assert!(misses.is_empty());

    // Deactivated placements disappear from the default listing
    store_product::set_active(&pool, s.id, cake.id, false).await.unwrap();
    let active = store_product::find_by_store(&pool, s.id, true, "").await.unwrap();
    assert!(active.is_empty());
    let including_inactive = store_product::find_by_store(&pool, s.id, false, "").await.unwrap();
    assert_eq!(including_inactive.len(), 1);
}

#[tokio::test]
async fn stores_for_product_ordered_by_position() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    let p = product::create(&pool, product_create("Empanada", ProductKind::Final, unit_id))
        .await
        .unwrap();

    let far = store::create(&pool, store_create("Sur", 5)).await.unwrap();
    let near = store::create(&pool, store_create("Centro", 1)).await.unwrap();
    let hidden = store::create(&pool, store_create("Cerrada", 0)).await.unwrap();

    for s in [far.id, near.id, hidden.id] {
        store_product::find_or_create(&pool, s, p.id).await.unwrap();
    }
    // Inactive stores are not part of the public projection
    store::update(
        &pool,
        hidden.id,
        inventory_server::db::models::StoreUpdate {
            is_active: Some(false),
            name: None,
            address: None,
            description: None,
            image_url: None,
            phone: None,
            email: None,
            city: None,
            province: None,
            latitude: None,
            longitude: None,
            position: None,
        },
    )
    .await
    .unwrap();

    let stores = store_product::stores_for_product(&pool, p.id).await.unwrap();
    let names: Vec<&str> = stores.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Centro", "Sur"]);
    assert_eq!(stores[0].city.as_deref(), Some("Quito"));
}

#[tokio::test]
async fn removing_a_placement_is_reported_distinctly() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    let p = product::create(&pool, product_create("Bolón", ProductKind::Final, unit_id))
        .await
        .unwrap();
    let s = store::create(&pool, store_create("Centro", 0)).await.unwrap();

    assert!(!store_product::remove(&pool, s.id, p.id).await.unwrap());
    store_product::find_or_create(&pool, s.id, p.id).await.unwrap();
    assert!(store_product::remove(&pool, s.id, p.id).await.unwrap());
    assert!(
        store_product::set_active(&pool, s.id, p.id, true)
            .await
            .unwrap()
            .is_none()
    );
}

// ========================================================================
// Movements
// ========================================================================

#[tokio::test]
async fn movements_apply_stock_deltas() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    let mut create = product_create("Levadura", ProductKind::Raw, unit_id);
    create.stock = 10.0;
    let p = product::create(&pool, create).await.unwrap();

    let mk = |kind: MovementKind, quantity: f64| MovementCreate {
        product_id: p.id,
        quantity,
        price: None,
        description: None,
        kind,
        reference_type: None,
        reference_id: None,
        date: None,
        created_by: 1,
    };

    movement::create(&pool, mk(MovementKind::In, 5.0)).await.unwrap();
    assert_eq!(stock_of(&pool, p.id).await, 15.0);

    movement::create(&pool, mk(MovementKind::Out, 3.0)).await.unwrap();
    assert_eq!(stock_of(&pool, p.id).await, 12.0);

    movement::create(&pool, mk(MovementKind::Adjustment, 100.0)).await.unwrap();
    assert_eq!(stock_of(&pool, p.id).await, 100.0);

    movement::create(&pool, mk(MovementKind::Production, 2.0)).await.unwrap();
    assert_eq!(stock_of(&pool, p.id).await, 102.0);

    let history = movement::find_by_product(&pool, p.id).await.unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].kind, MovementKind::Production);
}

#[tokio::test]
async fn movement_for_missing_product_is_not_found() {
    let pool = test_pool().await;
    let err = movement::create(
        &pool,
        MovementCreate {
            product_id: 777,
            quantity: 1.0,
            price: None,
            description: None,
            kind: MovementKind::In,
            reference_type: None,
            reference_id: None,
            date: None,
            created_by: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

async fn stock_of(pool: &SqlitePool, id: i64) -> f64 {
    product::find_row(pool, id).await.unwrap().unwrap().stock
}

// ========================================================================
// Uniqueness
// ========================================================================

#[tokio::test]
async fn duplicate_names_are_conflicts() {
    let pool = test_pool().await;
    seed_refs(&pool).await;

    let err = category::create(
        &pool,
        CategoryCreate {
            name: "Panes".into(),
            description: None,
            is_public: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    let err = unit::create(
        &pool,
        UnitCreate {
            name: "Kilogramo".into(),
            abbreviation: "kg".into(),
            description: None,
            factor: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn duplicate_sku_is_a_conflict() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;

    let mut first = product_create("Uno", ProductKind::Raw, unit_id);
    first.sku = Some("SKU-1".into());
    product::create(&pool, first).await.unwrap();

    let mut second = product_create("Dos", ProductKind::Raw, unit_id);
    second.sku = Some("SKU-1".into());
    let err = product::create(&pool, second).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn unit_still_in_use_cannot_be_deleted() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    product::create(&pool, product_create("Sal", ProductKind::Raw, unit_id))
        .await
        .unwrap();

    let err = unit::delete(&pool, unit_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

// ========================================================================
// Catalog showcase
// ========================================================================

#[tokio::test]
async fn catalog_entries_respect_uniqueness_and_time_window() {
    let pool = test_pool().await;
    let (unit_id, _) = seed_refs(&pool).await;
    let p = product::create(&pool, product_create("Rosca", ProductKind::Final, unit_id))
        .await
        .unwrap();

    let entry = |starts_at: Option<i64>, ends_at: Option<i64>| CatalogCreate {
        product_id: p.id,
        section: CatalogSection::Offers,
        title: Some("Rosca de temporada".into()),
        subtitle: None,
        image_url: None,
        badge: Some("-20%".into()),
        position: Some(1),
        is_active: Some(true),
        price_override: Some(3.5),
        wholesale_override_rules: None,
        store_id: None,
        starts_at,
        ends_at,
    };

    let now = inventory_server::utils::time::now_millis();
    catalog::create(&pool, entry(Some(now - 1000), Some(now + 100_000)), None)
        .await
        .unwrap();

    // Same (product, section, store) twice is a conflict
    let err = catalog::create(&pool, entry(None, None), None).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    let visible = catalog::find_active(&pool, Some(CatalogSection::Offers), None, now)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].price_override, Some(3.5));

    // Outside the window the entry disappears
    let later = now + 200_000;
    let expired = catalog::find_active(&pool, Some(CatalogSection::Offers), None, later)
        .await
        .unwrap();
    assert!(expired.is_empty());
}
