//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;

use crate::analysis::models::{
    AnalysisMode, AnalysisRequest, AnalysisResponse, JobRole, OptionsResponse,
};
use crate::analysis::pipeline::{extract_page_image, run_analysis};
use crate::document::EncodedPageImage;
use crate::errors::AppError;
use crate::state::AppState;

/// Fields collected from an analysis form submission.
#[derive(Debug, Default)]
struct AnalysisForm {
    resume: Option<Bytes>,
    job_description: Option<String>,
    role: Option<String>,
    mode: Option<String>,
}

/// Body-limit rejections become 413; anything else is a malformed form.
fn multipart_error(err: MultipartError, context: &str, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

impl AnalysisForm {
    async fn read(mut multipart: Multipart, limit: usize) -> Result<Self, AppError> {
        let mut form = AnalysisForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Malformed form data", limit))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error(e, "Failed to read upload", limit))?;
                    form.resume = Some(bytes);
                }
                "job_description" | "role" | "mode" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, &format!("Failed to read {name}"), limit))?;
                    match name.as_str() {
                        "job_description" => form.job_description = Some(value),
                        "role" => form.role = Some(value),
                        _ => form.mode = Some(value),
                    }
                }
                other => tracing::debug!("Ignoring unknown form field '{other}'"),
            }
        }

        Ok(form)
    }

    fn into_request(self) -> Result<(Option<Bytes>, AnalysisRequest), AppError> {
        let role_value = self
            .role
            .ok_or_else(|| AppError::Validation("role is required".to_string()))?;
        let role = JobRole::parse(&role_value)
            .ok_or_else(|| AppError::Validation(format!("Unknown role '{role_value}'")))?;

        let mode_value = self
            .mode
            .ok_or_else(|| AppError::Validation("mode is required".to_string()))?;
        let mode = AnalysisMode::parse(&mode_value)
            .ok_or_else(|| AppError::Validation(format!("Unknown analysis mode '{mode_value}'")))?;

        Ok((
            self.resume,
            AnalysisRequest {
                job_description: self.job_description.unwrap_or_default(),
                role,
                mode,
            },
        ))
    }
}

/// POST /api/v1/analyze
///
/// Multipart fields: `resume` (PDF), `job_description`, `role`, `mode`.
/// Only the first page of the résumé is read.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let (upload, request) = AnalysisForm::read(multipart, state.config.max_upload_bytes)
        .await?
        .into_request()?;

    let analysis = run_analysis(
        state.rasterizer.clone(),
        state.model.as_ref(),
        upload,
        &request,
    )
    .await?;

    Ok(Json(AnalysisResponse {
        analysis,
        role: request.role,
        mode: request.mode,
        model: state.model.model_name().to_string(),
        analyzed_at: Utc::now(),
    }))
}

/// POST /api/v1/preview
///
/// Returns the encoded first page for the comparison view. Does not call the model.
pub async fn handle_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EncodedPageImage>, AppError> {
    let form = AnalysisForm::read(multipart, state.config.max_upload_bytes).await?;
    let image = extract_page_image(state.rasterizer.clone(), form.resume).await?;
    Ok(Json(image))
}

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse::current())
}
