use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_RENDER_TARGET_WIDTH: u16 = 1200;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if `GOOGLE_API_KEY` is missing.
#[derive(Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Image shown in the sidebar. The sidebar renders without one when unset.
    pub sidebar_image_url: Option<String>,
    /// Directory holding the PDFium shared library, tried before `./` and the system path.
    pub pdfium_library_path: Option<PathBuf>,
    pub render_target_width: u16,
    pub max_upload_bytes: usize,
}

// Hand-written so the API key never reaches the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("google_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("sidebar_image_url", &self.sidebar_image_url)
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field("render_target_width", &self.render_target_width)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            google_api_key: non_empty("GOOGLE_API_KEY").with_context(|| {
                "Required environment variable 'GOOGLE_API_KEY' is not set".to_string()
            })?,
            gemini_model: non_empty("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: non_empty("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            port: non_empty("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(8080),
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            sidebar_image_url: non_empty("SIDEBAR_IMAGE_URL"),
            pdfium_library_path: non_empty("PDFIUM_LIBRARY_PATH").map(PathBuf::from),
            render_target_width: non_empty("RENDER_TARGET_WIDTH")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("RENDER_TARGET_WIDTH must be a positive integer below 65536")?
                .unwrap_or(DEFAULT_RENDER_TARGET_WIDTH),
            max_upload_bytes: non_empty("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = Config::from_source(lookup(&[("GOOGLE_API_KEY", "secret")])).unwrap();
        assert_eq!(config.google_api_key, "secret");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(
            config.gemini_api_base,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.sidebar_image_url.is_none());
        assert!(config.pdfium_library_path.is_none());
        assert_eq!(config.render_target_width, 1200);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_source(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails() {
        assert!(Config::from_source(lookup(&[("GOOGLE_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_source(lookup(&[
            ("GOOGLE_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_API_BASE", "http://localhost:9000/"),
            ("PORT", "3000"),
            ("SIDEBAR_IMAGE_URL", "https://cdn.example.com/a.png"),
            ("PDFIUM_LIBRARY_PATH", "/opt/pdfium/lib"),
            ("RENDER_TARGET_WIDTH", "800"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
        assert_eq!(config.gemini_api_base, "http://localhost:9000");
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.sidebar_image_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(
            config.pdfium_library_path,
            Some(PathBuf::from("/opt/pdfium/lib"))
        );
        assert_eq!(config.render_target_width, 800);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = Config::from_source(lookup(&[("GOOGLE_API_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_source(lookup(&[("GOOGLE_API_KEY", "super-secret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
