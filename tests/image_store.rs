//! Image store tests: upload validation and the shared-reference guard.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use inventory_server::db::models::{ProductCreate, ProductKind, ProductUpdate, UnitCreate};
use inventory_server::db::repository::{product, unit};
use inventory_server::services::ImageStore;

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

fn sample_image_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 120, 40]));
    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    buffer
}

async fn seed_product(pool: &SqlitePool, name: &str, image: Option<String>) -> i64 {
    let unit_id = match unit::find_by_name(pool, "Unidad").await.unwrap() {
        Some(u) => u.id,
        None => {
            unit::create(
                pool,
                UnitCreate {
                    name: "Unidad".into(),
                    abbreviation: "un".into(),
                    description: None,
                    factor: None,
                },
            )
            .await
            .unwrap()
            .id
        }
    };
    product::create(
        pool,
        ProductCreate {
            name: name.into(),
            description: None,
            kind: ProductKind::Final,
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
            primary_image_url: image,
            is_active: true,
        },
    )
    .await
    .unwrap()
    .id
}

#[test]
fn save_upload_rejects_garbage_and_stores_jpegs() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().to_path_buf());
    store.ensure_dir().unwrap();

    assert!(store.save_upload(b"not an image").is_err());
    assert!(store.save_upload(&[]).is_err());

    let filename = store.save_upload(&sample_image_bytes()).unwrap();
    assert!(filename.ends_with(".jpg"));
    let path = store.path_for(&filename);
    assert!(path.exists());

    // Stored files are re-encoded JPEGs
    let stored = std::fs::read(path).unwrap();
    assert!(image::load_from_memory(&stored).is_ok());
}

#[tokio::test]
async fn guard_keeps_file_while_another_product_references_it() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().to_path_buf());
    store.ensure_dir().unwrap();

    let filename = store.save_upload(&sample_image_bytes()).unwrap();
    let first = seed_product(&pool, "Primero", Some(filename.clone())).await;
    let _second = seed_product(&pool, "Segundo", Some(filename.clone())).await;

    // Deleting the first product must not remove the shared file
    product::delete(&pool, first).await.unwrap();
    store.remove_if_unreferenced(&pool, &filename, Some(first)).await;
    assert!(store.path_for(&filename).exists());
}

#[tokio::test]
async fn guard_removes_file_with_the_last_reference() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().to_path_buf());
    store.ensure_dir().unwrap();

    let filename = store.save_upload(&sample_image_bytes()).unwrap();
    let only = seed_product(&pool, "Único", Some(filename.clone())).await;

    product::delete(&pool, only).await.unwrap();
    store.remove_if_unreferenced(&pool, &filename, Some(only)).await;
    assert!(!store.path_for(&filename).exists());
}

#[tokio::test]
async fn clearing_the_image_reference_releases_the_file() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().to_path_buf());
    store.ensure_dir().unwrap();

    let filename = store.save_upload(&sample_image_bytes()).unwrap();
    let id = seed_product(&pool, "Con portada", Some(filename.clone())).await;

    // While the row still references the filename the guard keeps it,
    // except from the perspective of the row itself
    store.remove_if_unreferenced(&pool, &filename, None).await;
    assert!(store.path_for(&filename).exists());

    product::update(
        &pool,
        id,
        ProductUpdate {
            primary_image_url: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    store.remove_if_unreferenced(&pool, &filename, Some(id)).await;
    assert!(!store.path_for(&filename).exists());
}
