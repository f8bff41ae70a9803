//! Per-request analysis flow: `AwaitingInput -> Processing -> Done | Failed`.
//!
//! The document is rasterized first; the model is only called once a page image exists.

use std::sync::Arc;

use anyhow::anyhow;
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::dispatcher::dispatch;
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::document::{extract_first_page, DocumentError, EncodedPageImage, PageRasterizer};
use crate::errors::AppError;
use crate::llm_client::ModelClient;

/// Runs the blocking extractor on tokio's blocking pool.
pub async fn extract_page_image(
    rasterizer: Arc<dyn PageRasterizer>,
    upload: Option<Bytes>,
) -> Result<EncodedPageImage, AppError> {
    let upload = upload.ok_or(DocumentError::Missing)?;
    let image = tokio::task::spawn_blocking(move || extract_first_page(rasterizer.as_ref(), &upload))
        .await
        .map_err(|e| AppError::Internal(anyhow!("PDF extraction task failed: {e}")))??;
    Ok(image)
}

/// Extracts the résumé's first page, then dispatches one model call.
pub async fn run_analysis(
    rasterizer: Arc<dyn PageRasterizer>,
    model: &dyn ModelClient,
    upload: Option<Bytes>,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    let span = info_span!(
        "analysis",
        request_id = %Uuid::new_v4(),
        role = request.role.slug(),
        mode = request.mode.slug(),
    );

    async move {
        info!(
            upload_bytes = upload.as_ref().map(|b| b.len()).unwrap_or(0),
            job_description_chars = request.job_description.chars().count(),
            "Processing analysis"
        );

        let outcome = async {
            let image = extract_page_image(rasterizer, upload).await?;
            let result = dispatch(model, request, &image).await?;
            Ok::<_, AppError>(result)
        }
        .await;

        match &outcome {
            Ok(result) => info!(result_chars = result.as_str().chars().count(), "Analysis done"),
            Err(e) => warn!("Analysis failed: {e}"),
        }
        outcome
    }
    .instrument(span)
    .await
}
