//! Single-page UI: About, ATS and FAQs tabs rendered server-side with askama.

use askama::Template;
use axum::{extract::State, response::Html};

use crate::analysis::models::{OptionEntry, OptionsResponse};
use crate::errors::AppError;
use crate::state::AppState;

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

const FAQS: [Faq; 3] = [
    Faq {
        question: "What is Gemini resume expert?",
        answer: "It is a resume analysis and optimization tool powered by artificial intelligence. \
                 It helps job seekers craft ATS-friendly resumes that stand out in the applicant pool.",
    },
    Faq {
        question: "How does it work?",
        answer: "Simply upload your resume (and optionally a job description) and our system will \
                 analyze it to identify key areas for improvement. You'll receive a report with \
                 insights on skill gaps, keyword optimization, readability, and more.",
    },
    Faq {
        question: "Is it free to use?",
        answer: "This may offer a free trial or basic functionalities. For more advanced features \
                 or in-depth analysis, there might be paid subscription options. Check the website \
                 for specific pricing details.",
    },
];

const HOW_IT_WORKS: [&str; 3] = [
    "Upload your resume: Simply drag and drop your resume file or upload it from your computer.",
    "Enter job description (optional): Provide the job description you're targeting for a more tailored analysis.",
    "Get powerful analysis: Our system will analyze your resume and provide you with a comprehensive report.",
];

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub sidebar_image_url: Option<&'a str>,
    pub roles: Vec<OptionEntry>,
    pub modes: Vec<OptionEntry>,
    pub steps: &'a [&'static str],
    pub faqs: &'a [Faq],
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let options = OptionsResponse::current();
    let page = IndexPage {
        sidebar_image_url: state.config.sidebar_image_url.as_deref(),
        roles: options.roles,
        modes: options.modes,
        steps: &HOW_IT_WORKS,
        faqs: &FAQS,
    };
    Ok(Html(page.render()?))
}
