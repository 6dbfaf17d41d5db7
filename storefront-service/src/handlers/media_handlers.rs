use axum::{
    extract::{Extension, Multipart},
    Json,
};
use log::info;
use once_cell::sync::OnceCell;
use pinkcart_shared::auth::AuthContext;
use pinkcart_shared::media::{ImageHost, DEFAULT_FOLDER};
use pinkcart_shared::models::Role;

use crate::error::{AppError, Result};

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Body limit for the upload route, with headroom for multipart framing.
pub const MAX_UPLOAD_BODY_BYTES: usize = 6 * 1024 * 1024;

static IMAGE_HOST: OnceCell<ImageHost> = OnceCell::new();

fn image_host() -> Result<&'static ImageHost> {
    IMAGE_HOST.get_or_try_init(|| {
        ImageHost::from_env().map_err(|e| AppError::internal_server_error(e.to_string()))
    })
}

// POST /admin/upload
pub async fn upload_image(
    Extension(ctx): Extension<AuthContext>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    ctx.require_role(Role::Admin)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string).unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(AppError::bad_request("File must be an image".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {}", e)))?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::bad_request(
                "File size must be less than 5MB".to_string(),
            ));
        }

        let folder = format!("{}/products", DEFAULT_FOLDER);
        let stored = image_host()?
            .upload(data.to_vec(), &content_type, &folder)
            .await?;

        info!("Uploaded image {} for user {}", stored.image_id, ctx.user_id);

        return Ok(Json(serde_json::json!({
            "success": true,
            "image": {
                "url": stored.url,
                "imageId": stored.image_id
            }
        })));
    }

    Err(AppError::bad_request("No image file provided".to_string()))
}
