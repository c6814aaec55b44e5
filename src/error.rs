use async_graphql::ErrorExtensions;
use sea_orm::DbErr;
use thiserror::Error;

/// Domain errors surfaced through the GraphQL layer.
///
/// Every variant carries the message shown to the client; the variant
/// itself maps to a machine-readable `code` extension on the GraphQL
/// error. Database failures are logged where they happen and surface
/// with a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Authorization(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal(String),
    #[error("Internal server error")]
    Database(#[from] DbErr),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Machine-readable code attached to the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Authentication(_) => "AUTHENTICATION_ERROR",
            Self::Authorization(_) => "AUTHORIZATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) | Self::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn codes_match_variants() {
        assert_eq!(ApiError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(ApiError::authentication("x").code(), "AUTHENTICATION_ERROR");
        assert_eq!(ApiError::authorization("x").code(), "AUTHORIZATION_ERROR");
        assert_eq!(ApiError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(ApiError::Internal("x".to_string()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::Internal("argon2 blew up".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }
}
