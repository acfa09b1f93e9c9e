use std::path::{Path, PathBuf};

use validator::{ValidationError, ValidationErrors};

use crate::config::MediaConfig;

const RECIPE_IMAGE_DIR: &str = "uploads/recipe";

/// Uploaded files on local disk, addressed by paths relative to `root`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStore {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: config.root.to_owned(),
            url_prefix: config.url_prefix.trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.url_prefix, path)
    }

    /// Checks that `data` decodes as an image and writes it under a fresh
    /// name. Returns the stored path relative to the media root.
    pub async fn save_recipe_image(&self, data: Vec<u8>) -> recipebox_shared::Result<String> {
        let ext = tokio::task::spawn_blocking(move || {
            let format = image::guess_format(&data).ok()?;
            image::load_from_memory_with_format(&data, format).ok()?;
            let ext = format.extensions_str().first()?;

            Some((ext.to_string(), data))
        })
        .await
        .map_err(anyhow::Error::from)?;

        let Some((ext, data)) = ext else {
            let mut errors = ValidationErrors::new();
            errors.add(
                "image",
                ValidationError::new("invalid_image").with_message(
                    "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
                        .into(),
                ),
            );

            return Err(errors.into());
        };

        let path = format!("{RECIPE_IMAGE_DIR}/{}.{ext}", uuid::Uuid::new_v4());
        let full_path = self.root.join(&path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, &data).await?;

        tracing::debug!(path = %path, bytes = data.len(), "image stored");

        Ok(path)
    }

    /// Removes a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, path: &str) {
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => tracing::debug!(path, "media file removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(path, "failed to remove media file: {err}"),
        }
    }
}
