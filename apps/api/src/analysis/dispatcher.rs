//! Prompt dispatcher: picks the template for the requested perspective and makes the model call.

use crate::analysis::models::{AnalysisMode, AnalysisRequest, AnalysisResult, JobRole};
use crate::analysis::prompts::{ATS_PROMPT_TEMPLATE, HR_PROMPT_TEMPLATE, ROLE_PLACEHOLDER};
use crate::document::EncodedPageImage;
use crate::llm_client::{ContentPart, ModelCallError, ModelClient};

/// Fills the template for `mode` with the role's label.
pub fn build_prompt(mode: AnalysisMode, role: JobRole) -> String {
    let template = match mode {
        AnalysisMode::Hr => HR_PROMPT_TEMPLATE,
        AnalysisMode::Ats => ATS_PROMPT_TEMPLATE,
    };
    template.replace(ROLE_PLACEHOLDER, role.label())
}

/// Sends `[job description, page image, filled prompt]` to the model in that order.
/// One call per invocation; nothing is memoized.
pub async fn dispatch(
    model: &dyn ModelClient,
    request: &AnalysisRequest,
    image: &EncodedPageImage,
) -> Result<AnalysisResult, ModelCallError> {
    let prompt = build_prompt(request.mode, request.role);
    let parts = [
        ContentPart::Text(&request.job_description),
        ContentPart::Image(image),
        ContentPart::Text(&prompt),
    ];

    let text = model.generate(&parts).await?;
    Ok(AnalysisResult(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::RecordingModel;

    fn request(mode: AnalysisMode) -> AnalysisRequest {
        AnalysisRequest {
            job_description: "Build forecasting models in Python.".to_string(),
            role: JobRole::DataScientist,
            mode,
        }
    }

    fn image() -> EncodedPageImage {
        EncodedPageImage::jpeg(b"page-one")
    }

    #[test]
    fn test_hr_prompt_substitutes_role() {
        let prompt = build_prompt(AnalysisMode::Hr, JobRole::DataScientist);
        assert_eq!(
            prompt,
            HR_PROMPT_TEMPLATE.replace("{role}", "Data Scientist")
        );
        assert!(prompt.contains("job description for a Data Scientist."));
        assert!(prompt.contains("experienced Human Resource Manager"));
        assert!(!prompt.contains("{role}"));
    }

    #[test]
    fn test_ats_prompt_orders_percentage_keywords_thoughts() {
        let prompt = build_prompt(AnalysisMode::Ats, JobRole::ProductManager);
        assert!(prompt.contains("job description for a Product Manager."));
        assert!(!prompt.contains("{role}"));

        let percentage = prompt.find("as a percentage").unwrap();
        let keywords = prompt.find("keywords missing").unwrap();
        let thoughts = prompt.find("final thoughts").unwrap();
        assert!(percentage < keywords && keywords < thoughts);
    }

    #[test]
    fn test_templates_differ_by_mode() {
        assert_ne!(
            build_prompt(AnalysisMode::Hr, JobRole::Designer),
            build_prompt(AnalysisMode::Ats, JobRole::Designer)
        );
    }

    #[tokio::test]
    async fn test_dispatch_sends_three_parts_in_order() {
        let model = RecordingModel::replying("Strong candidate.");
        let image = image();

        let result = dispatch(&model, &request(AnalysisMode::Hr), &image)
            .await
            .unwrap();

        assert_eq!(result.as_str(), "Strong candidate.");
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.len(), 3);
        assert_eq!(call[0], "text:Build forecasting models in Python.");
        assert_eq!(call[1], format!("image:image/jpeg:{}", image.data));
        assert_eq!(
            call[2],
            format!("text:{}", build_prompt(AnalysisMode::Hr, JobRole::DataScientist))
        );
    }

    #[tokio::test]
    async fn test_identical_requests_make_independent_calls() {
        let model = RecordingModel::replying("72%");
        let image = image();
        let req = request(AnalysisMode::Ats);

        dispatch(&model, &req, &image).await.unwrap();
        dispatch(&model, &req, &image).await.unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = RecordingModel::failing(503, "overloaded");
        let err = dispatch(&model, &request(AnalysisMode::Hr), &image())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelCallError::Api { status: 503, .. }));
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_job_description_is_sent_as_is() {
        let model = RecordingModel::replying("ok");
        let mut req = request(AnalysisMode::Hr);
        req.job_description.clear();

        dispatch(&model, &req, &image()).await.unwrap();
        assert_eq!(model.calls()[0][0], "text:");
    }
}
