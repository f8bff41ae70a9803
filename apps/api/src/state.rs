use std::sync::Arc;

use crate::config::Config;
use crate::document::PageRasterizer;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Renders the résumé's first page. Default: PdfiumRasterizer.
    pub rasterizer: Arc<dyn PageRasterizer>,
    /// Hosted model used for analysis. Default: GeminiClient.
    pub model: Arc<dyn ModelClient>,
}
