use crate::utils::{image_extension, sanitize_stem};
use std::path::{Path, PathBuf};

/// Downloads product images into a local directory.
///
/// Filenames derive from the product name, so re-running against the
/// same catalog re-downloads nothing. The directory is never pruned.
pub struct ImageStore {
    dir: PathBuf,
    client: reqwest::Client,
}

impl ImageStore {
    /// Create the store, creating the directory if absent.
    pub fn new(dir: impl AsRef<Path>, user_agent: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { dir, client })
    }

    /// Filename an image for this product is stored under
    pub fn filename_for(product_name: &str, image_url: &str) -> String {
        format!(
            "{}{}",
            sanitize_stem(product_name),
            image_extension(image_url)
        )
    }

    /// Download the product's primary image.
    ///
    /// Idempotent: an existing file short-circuits without network I/O.
    /// Failures are logged and reported as `None`; they never abort the
    /// run.
    pub async fn fetch(&self, image_url: &str, product_name: &str) -> Option<String> {
        let filename = Self::filename_for(product_name, image_url);
        let path = self.dir.join(&filename);
        if path.exists() {
            ::log::debug!("Image already downloaded: {}", filename);
            return Some(filename);
        }

        let response = match self.client.get(image_url).send().await {
            Ok(response) => response,
            Err(e) => {
                ::log::warn!("Error downloading image {}: {}", image_url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            ::log::warn!(
                "Image request for {} returned {}",
                image_url,
                response.status()
            );
            return None;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                ::log::warn!("Error reading image body {}: {}", image_url, e);
                return None;
            }
        };
        if let Err(e) = tokio::fs::write(&path, &body).await {
            ::log::warn!("Failed to write {}: {}", path.display(), e);
            return None;
        }

        ::log::info!("Saved image {}", filename);
        Some(filename)
    }
}
