use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Default prefix for product image links. The image hash and a trailing
/// slash are appended.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://cf.shopee.sg/file";

/// Default prefix for product page links. `{shop_id}/{item_id}/` is appended.
pub const DEFAULT_PRODUCT_BASE_URL: &str = "https://shopee.co.id/product";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// CSV catalog file. The CLI's `--catalog` flag takes precedence.
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
    pub image_base_url: String,
    pub product_base_url: String,
}

impl AppConfig {
    /// Resolves the catalog file, preferring `override_path` over the
    /// configured `SHOPGUIDE_CATALOG_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when neither source names a file.
    pub fn catalog_path<'a>(
        &'a self,
        override_path: Option<&'a Path>,
    ) -> Result<&'a Path, ConfigError> {
        override_path
            .or(self.catalog_path.as_deref())
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPGUIDE_CATALOG_PATH".to_string()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_level: "info".to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            product_base_url: DEFAULT_PRODUCT_BASE_URL.to_string(),
        }
    }
}
