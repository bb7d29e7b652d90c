//! Backend address configuration.

use crate::error::{Error, Result};

/// Fallback backend address when no override is given.
pub const DEFAULT_BACKEND_URL: &str = "http://54.198.145.146:5000";

/// Environment variable that overrides the backend address.
pub const BACKEND_URL_ENV: &str = "ROIVIEW_BACKEND_URL";

/// Upstream path of the full ROI list.
pub const ROI_LIST_PATH: &str = "/api/roi/all";

/// Upstream path of the aggregate statistics.
pub const STATS_PATH: &str = "/api/stats";

/// Immutable base address of an ROI image API.
///
/// Resolved once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Creates a config from a base address such as `http://host:5000`.
    ///
    /// Trailing slashes are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBackendUrl`] if the address is not `http(s)://`.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(Error::InvalidBackendUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Resolves the address from an explicit value, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBackendUrl`] if the override is malformed.
    pub fn resolve(override_url: Option<&str>) -> Result<Self> {
        match override_url {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Ok(Self::default()),
        }
    }

    /// Base address without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a path (starting with `/`) onto the base address.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of the full ROI list.
    pub fn roi_list_url(&self) -> String {
        self.join(ROI_LIST_PATH)
    }

    /// URL of the aggregate statistics.
    pub fn stats_url(&self) -> String {
        self.join(STATS_PATH)
    }

    /// URL of one ROI crop with the query string passed through verbatim.
    pub fn image_url(&self, roi_index: &str, query: Option<&str>) -> String {
        format!(
            "{}/api/roi/{}/image?{}",
            self.base_url,
            roi_index,
            query.unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_resolve() {
        assert_eq!(BackendConfig::default().base_url(), DEFAULT_BACKEND_URL);
        assert_eq!(BackendConfig::resolve(None).unwrap(), BackendConfig::default());
        assert_eq!(
            BackendConfig::resolve(Some("  ")).unwrap(),
            BackendConfig::default()
        );
        let cfg = BackendConfig::resolve(Some("https://example.org:8443/")).unwrap();
        assert_eq!(cfg.base_url(), "https://example.org:8443");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(BackendConfig::new("example.org").is_err());
        assert!(BackendConfig::new("http://").is_err());
        assert!(BackendConfig::new("ftp://example.org").is_err());
    }

    #[test]
    fn test_urls() {
        let cfg = BackendConfig::new("http://10.0.0.1:5000").unwrap();
        assert_eq!(cfg.roi_list_url(), "http://10.0.0.1:5000/api/roi/all");
        assert_eq!(cfg.stats_url(), "http://10.0.0.1:5000/api/stats");
        assert_eq!(
            cfg.image_url("7", Some("size=5&row=0&channel=2")),
            "http://10.0.0.1:5000/api/roi/7/image?size=5&row=0&channel=2"
        );
        assert_eq!(cfg.image_url("3", None), "http://10.0.0.1:5000/api/roi/3/image?");
    }
}
