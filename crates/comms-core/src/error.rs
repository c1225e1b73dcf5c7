use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommsError {
    #[error("invalid engagement level '{0}': expected Unaware, Resistant, Neutral, Supportive or Leading")]
    InvalidEngagement(String),

    #[error("invalid value '{value}' for {kind}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("rating {0} is out of range: must be between 1 and 5")]
    InvalidRating(i64),

    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("invalid profile picture: expected an image data URI")]
    InvalidPicture,

    #[error("requirement not found: {0}")]
    RequirementNotFound(String),

    #[error("a request is already in flight for {0}")]
    Busy(&'static str),

    #[error("missing credentials: set one of {0}")]
    MissingCredentials(String),

    #[error("analysis gateway failed: {0}")]
    Gateway(String),

    #[error("analysis gateway returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("unsupported file '{0}': only plain text and .docx files can be imported")]
    UnsupportedFile(String),

    #[error("config not found: {0}")]
    ConfigNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl CommsError {
    /// True for failures originating at the analysis gateway boundary
    /// (configuration, transport or response shape).
    pub fn is_gateway_failure(&self) -> bool {
        matches!(
            self,
            CommsError::MissingCredentials(_)
                | CommsError::Gateway(_)
                | CommsError::MalformedResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CommsError>;
