use thiserror::Error;

/// Coarse classification used for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed request parameters.
    Validation,
    /// Missing column or project row.
    NotFound,
    /// Credentials, network or store failure.
    Infrastructure,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Missing or invalid parameters: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store configuration error: {0}")]
    ConfigError(String),

    #[error("Store request failed: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Store responded with HTTP {status}: {body}")]
    StoreResponse { status: u16, body: String },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV store error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("Malformed store payload: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Service account token error: {source}")]
    TokenError {
        #[from]
        source: jsonwebtoken::errors::Error,
    },

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Infrastructure,
        }
    }

    /// Maps the error onto a gRPC status. Infrastructure failures only carry
    /// their underlying cause when `expose_details` is set.
    pub fn to_status(&self, expose_details: bool) -> tonic::Status {
        match self.kind() {
            ErrorKind::Infrastructure => tracing::error!(error = %self, "Mapping LedgerError to tonic::Status"),
            kind => tracing::warn!(error = %self, ?kind, "Mapping LedgerError to tonic::Status"),
        }
        match self.kind() {
            ErrorKind::Validation => tonic::Status::invalid_argument(self.to_string()),
            ErrorKind::NotFound => tonic::Status::not_found(self.to_string()),
            ErrorKind::Infrastructure => {
                if expose_details {
                    tonic::Status::internal(format!("Error accessing the budget spreadsheet: {}", self))
                } else {
                    tonic::Status::internal("Error accessing the budget spreadsheet")
                }
            }
        }
    }
}

impl From<LedgerError> for tonic::Status {
    fn from(err: LedgerError) -> Self {
        err.to_status(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let status: tonic::Status = LedgerError::Validation("project_id is required".into()).into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("project_id is required"));
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let status: tonic::Status = LedgerError::NotFound("Project not found: 123".into()).into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "Project not found: 123");
    }

    #[test]
    fn test_infrastructure_hides_details_unless_exposed() {
        let err = LedgerError::ConfigError("GOOGLE_SERVICE_ACCOUNT_EMAIL is not set".into());
        assert_eq!(err.kind(), ErrorKind::Infrastructure);

        let hidden = err.to_status(false);
        assert_eq!(hidden.code(), tonic::Code::Internal);
        assert!(!hidden.message().contains("GOOGLE_SERVICE_ACCOUNT_EMAIL"));

        let shown = err.to_status(true);
        assert!(shown.message().contains("GOOGLE_SERVICE_ACCOUNT_EMAIL"));
    }

    #[test]
    fn test_store_response_is_infrastructure() {
        let err = LedgerError::StoreResponse { status: 403, body: "PERMISSION_DENIED".into() };
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
    }
}
