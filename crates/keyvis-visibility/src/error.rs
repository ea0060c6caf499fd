use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error("search query failed: {0}")]
    Search(String),

    #[error("stats extraction failed: {0}")]
    Extraction(String),
}
