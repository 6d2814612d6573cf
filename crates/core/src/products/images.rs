//! Product Images

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Maximum number of images a product can carry.
pub const MAX_IMAGES: usize = 6;

/// An uploaded product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Public URL of the stored file
    pub url: String,

    /// File name as uploaded
    #[serde(default)]
    pub original_name: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,

    /// MIME type reported at upload
    #[serde(default)]
    pub mime_type: String,

    /// Upload time
    pub upload_date: Timestamp,

    /// Whether this is the image shown in listings
    #[serde(default)]
    pub is_primary: bool,
}

impl ProductImage {
    /// Create a non-primary image uploaded at `upload_date`.
    pub fn new(url: impl Into<String>, upload_date: Timestamp) -> Self {
        Self {
            url: url.into(),
            original_name: String::new(),
            size: 0,
            mime_type: String::new(),
            upload_date,
            is_primary: false,
        }
    }

    /// Mark the image as primary.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// The image flagged primary, or the first image when none is flagged.
pub fn primary_image(images: &[ProductImage]) -> Option<&ProductImage> {
    images
        .iter()
        .find(|image| image.is_primary)
        .or_else(|| images.first())
}
