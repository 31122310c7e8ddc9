//! Image Store
//!
//! 负责商品图片文件的保存与孤儿文件清理
//!
//! Uploaded images are validated, re-encoded to JPEG and written under a
//! UUID filename before the database row is touched. Deletions are
//! best-effort: a file is only removed from disk when no product row still
//! references its filename, and a failed removal is logged, never raised.

use std::io::Cursor;
use std::path::PathBuf;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::repository::product;
use crate::utils::AppError;

/// Maximum upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality for product images
const JPEG_QUALITY: u8 = 85;

/// 图片存储服务
#[derive(Clone, Debug)]
pub struct ImageStore {
    /// 图片目录路径: {work_dir}/uploads/images
    images_dir: PathBuf,
}

impl ImageStore {
    pub fn new(images_dir: PathBuf) -> Self {
        Self { images_dir }
    }

    /// Create the images directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.images_dir)
            .map_err(|e| AppError::internal(format!("Failed to create images directory: {e}")))?;
        Ok(())
    }

    /// 获取图片文件路径
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.images_dir.join(filename)
    }

    /// Validate an uploaded image, re-encode it as JPEG and write it to
    /// disk. Returns the stored filename.
    pub fn save_upload(&self, data: &[u8]) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Empty image file provided"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "Image too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let img = image::load_from_memory(data)
            .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img
                .write_with_encoder(encoder)
                .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
        }

        let filename = format!("{}.jpg", Uuid::new_v4());
        let file_path = self.path_for(&filename);
        std::fs::write(&file_path, &buffer)
            .map_err(|e| AppError::internal(format!("Failed to save image: {e}")))?;

        tracing::info!(filename = %filename, size = buffer.len(), "Image stored");
        Ok(filename)
    }

    /// Best-effort removal; a failure is logged and swallowed
    pub async fn remove_quietly(&self, filename: &str) {
        let file_path = self.path_for(filename);
        if !file_path.exists() {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(&file_path).await {
            tracing::warn!(filename = %filename, error = %e, "Failed to delete image file");
        }
    }

    /// Shared-reference guard: delete the file iff no remaining product row
    /// references the same filename (the mutated row excluded).
    pub async fn remove_if_unreferenced(
        &self,
        pool: &SqlitePool,
        filename: &str,
        exclude_product_id: Option<i64>,
    ) {
        match product::count_image_refs(pool, filename, exclude_product_id).await {
            Ok(0) => self.remove_quietly(filename).await,
            Ok(refs) => {
                tracing::debug!(filename = %filename, refs, "Image still referenced, keeping file");
            }
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "Reference count failed, keeping file");
            }
        }
    }
}
