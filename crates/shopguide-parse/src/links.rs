use shopguide_core::app_config::{DEFAULT_IMAGE_BASE_URL, DEFAULT_PRODUCT_BASE_URL};
use shopguide_core::AppConfig;

/// Returned in place of an image link when an item has no image hash.
pub const NO_IMAGE: &str = "No image available.";

/// Builds storefront links for catalog items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFormatter {
    image_base_url: String,
    product_base_url: String,
}

impl LinkFormatter {
    /// Creates a formatter over the given prefixes. Trailing slashes are
    /// ignored.
    #[must_use]
    pub fn new(image_base_url: &str, product_base_url: &str) -> Self {
        Self {
            image_base_url: image_base_url.trim_end_matches('/').to_owned(),
            product_base_url: product_base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.image_base_url, &config.product_base_url)
    }

    /// Link to the image for `hash`, or [`NO_IMAGE`] when `hash` is blank.
    #[must_use]
    pub fn image_url(&self, hash: &str) -> String {
        let hash = hash.trim();
        if hash.is_empty() {
            NO_IMAGE.to_owned()
        } else {
            format!("{}/{hash}/", self.image_base_url)
        }
    }

    /// Link to the product page, e.g. `https://shopee.co.id/product/418901918/23649650636/`.
    #[must_use]
    pub fn product_url(&self, shop_id: i64, item_id: i64) -> String {
        format!("{}/{shop_id}/{item_id}/", self.product_base_url)
    }
}

impl Default for LinkFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL, DEFAULT_PRODUCT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_empty_hash_is_sentinel() {
        assert_eq!(LinkFormatter::default().image_url(""), "No image available.");
    }

    #[test]
    fn image_url_blank_hash_is_sentinel() {
        assert_eq!(LinkFormatter::default().image_url("  "), NO_IMAGE);
    }

    #[test]
    fn image_url_uses_fixed_prefix() {
        assert_eq!(
            LinkFormatter::default().image_url("abc123"),
            "https://cf.shopee.sg/file/abc123/"
        );
    }

    #[test]
    fn product_url_uses_template() {
        assert_eq!(
            LinkFormatter::default().product_url(418_901_918, 23_649_650_636),
            "https://shopee.co.id/product/418901918/23649650636/"
        );
    }

    #[test]
    fn custom_prefixes_ignore_trailing_slash() {
        let links = LinkFormatter::new("https://img.test/f/", "https://shop.test/p/");
        assert_eq!(links.image_url("h1"), "https://img.test/f/h1/");
        assert_eq!(links.product_url(1, 2), "https://shop.test/p/1/2/");
    }

    #[test]
    fn from_config_uses_configured_prefixes() {
        let config = AppConfig {
            image_base_url: "https://img.test".to_string(),
            ..AppConfig::default()
        };
        let links = LinkFormatter::from_config(&config);
        assert_eq!(links.image_url("h1"), "https://img.test/h1/");
        assert_eq!(
            links.product_url(1, 2),
            "https://shopee.co.id/product/1/2/"
        );
    }
}
