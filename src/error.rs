use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Website data is required")]
    MissingWebsiteData,

    #[error("Invalid website data: {0}")]
    InvalidSnapshot(String),

    #[error("Failed to analyze SEO: {0}")]
    Analysis(String),
}

impl AuditError {
    /// Whether the caller sent bad input, as opposed to the engine failing
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuditError::MissingWebsiteData | AuditError::InvalidSnapshot(_)
        )
    }
}
