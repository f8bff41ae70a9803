// Résumé analysis: prompt selection, the single model call, and the HTTP handlers around them.
// All model calls go through llm_client; no direct Gemini requests here.

pub mod dispatcher;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
