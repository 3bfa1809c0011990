use thiserror::Error;

/// Fatal scrape failures. Extraction-level problems never surface here; they
/// degrade their own category and the scrape carries on.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Navigation failed: {0}")]
    Navigation(String),
}

/// Fatal clone-generation failures.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("Completion failed: {0}")]
    Completion(#[from] gemini_client::GeminiError),
}
