use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and the CLI's exit diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidDate,
    InvalidConfig,
    NotFound,

    // Extraction
    ExtractionFailed,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,
    Timeout,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDate => "ERR_INVALID_DATE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ExtractionFailed => "ERR_EXTRACTION_FAILED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation name, entity id such as a snapshot date or a path) for
/// debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (snapshot date, file path, URL)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " ({})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by the chart model and extraction code
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// A date key is not in `YYYY-MM-DD` form
    #[error("Invalid chart date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Ranks in a chart are not 1, 2, 3, ... in list order
    #[error("Invalid rank {rank} for '{title}': expected {expected}")]
    InvalidRank {
        title: String,
        rank: u32,
        expected: u32,
    },

    /// No strategy produced a single entry from the page
    #[error("No chart entries could be extracted (tried {})", .strategies.join(", "))]
    NothingExtracted { strategies: Vec<&'static str> },
}

impl From<ChartError> for ExError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::InvalidDate { ref value } => ExError::new(ExErrorKind::InvalidDate)
                .with_entity_id(value.clone())
                .with_message(err.to_string()),
            ChartError::InvalidRank { ref title, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(title.clone())
                .with_message(err.to_string()),
            ChartError::NothingExtracted { .. } => {
                ExError::new(ExErrorKind::ExtractionFailed).with_message(err.to_string())
            }
        }
    }
}
