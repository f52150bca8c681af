use thiserror::Error;

/// All possible error types that may occur while turning form state into backend requests
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Edit page opened without an id in the route
    #[error("Movie id not found")]
    MissingMovieId,
    /// Field value that passed validation but could not be converted for a request
    #[error("Invalid value for `{field}`: `{value}`")]
    InvalidField {
        /// Name of the schema field
        field: &'static str,
        /// Raw text of the field
        value: String,
    },
    /// Gender text that is not one of the known codes
    #[error("Unknown gender `{0}`")]
    UnknownGender(String),
    /// Failure to encode a request body
    #[error("JSON error\n{0}")]
    Json(#[from] serde_json::Error),
}

/// Generic [Result][std::result::Result] type where the error is always [CatalogError]
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
