use crate::config::ImageConfig;
use crate::error::{ImageLoadError, SearchError};
use crate::model::RecipeRecord;
use config::ConfigError;
use image::imageops::FilterType;
use image::{ImageFormat, ImageResult, RgbaImage};
use log::debug;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// A decoded recipe image resized to a fixed square
#[derive(Debug, Clone)]
pub struct Thumbnail {
    image: RgbaImage,
}

impl Thumbnail {
    /// Decode raw image bytes and resize them to `size` x `size` pixels
    pub fn from_bytes(bytes: &[u8], size: u32) -> Result<Self, ImageLoadError> {
        let decoded = image::load_from_memory(bytes)?;
        let resized = decoded.resize_exact(size, size, FilterType::Lanczos3);
        Ok(Thumbnail {
            image: resized.to_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: &Path) -> ImageResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)
    }
}

/// Fetches recipe thumbnails; each image succeeds or fails on its own
#[derive(Clone)]
pub struct ThumbnailLoader {
    client: Client,
    size: u32,
    concurrency: usize,
}

impl ThumbnailLoader {
    pub fn new(config: &ImageConfig, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Message(format!("failed to create HTTP client: {}", e)))?;

        Ok(ThumbnailLoader {
            client,
            size: config.thumbnail_size,
            concurrency: config.concurrency.max(1),
        })
    }

    /// Fetch and decode one image. Decoding runs on the blocking pool.
    pub async fn load(&self, url: Option<&str>) -> Result<Thumbnail, ImageLoadError> {
        let url = url.ok_or(ImageLoadError::MissingUrl)?;
        debug!("Fetching image {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageLoadError::Fetch(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageLoadError::Fetch(e.without_url()))?;

        let size = self.size;
        tokio::task::spawn_blocking(move || Thumbnail::from_bytes(&bytes, size))
            .await
            .map_err(|e| ImageLoadError::Task(e.to_string()))?
    }

    /// Fetch thumbnails for every record, at most `concurrency` at a time.
    ///
    /// The returned vector lines up with `records`.
    pub async fn load_all(&self, records: &[RecipeRecord]) -> Vec<Result<Thumbnail, ImageLoadError>> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let handles: Vec<_> = records
            .iter()
            .map(|record| {
                let loader = self.clone();
                let semaphore = Arc::clone(&semaphore);
                let url = record.image_url.clone();
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| ImageLoadError::Task(e.to_string()))?;
                    loader.load(url.as_deref()).await
                })
            })
            .collect();

        let mut thumbnails = Vec::with_capacity(handles.len());
        for handle in handles {
            thumbnails.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(ImageLoadError::Task(e.to_string())),
            });
        }
        thumbnails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 80, 40, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_thumbnail_is_resized_to_square() {
        let thumbnail = Thumbnail::from_bytes(&png_bytes(40, 20), 150).unwrap();
        assert_eq!(thumbnail.width(), 150);
        assert_eq!(thumbnail.height(), 150);
        assert_eq!(thumbnail.as_rgba().dimensions(), (150, 150));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = Thumbnail::from_bytes(b"definitely not an image", 150);
        assert!(matches!(result, Err(ImageLoadError::Decode(_))));
    }

    #[tokio::test]
    async fn test_missing_url_is_isolated_error() {
        let loader = ThumbnailLoader::new(&ImageConfig::default(), None).unwrap();
        let result = loader.load(None).await;
        assert!(matches!(result, Err(ImageLoadError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_load_all_empty() {
        let loader = ThumbnailLoader::new(&ImageConfig::default(), None).unwrap();
        assert!(loader.load_all(&[]).await.is_empty());
    }
}
