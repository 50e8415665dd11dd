use core::fmt;

/// Context markers used when reporting serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerKind {
    /// Top-level proof framing.
    Proof,
    /// Per-query opening list.
    Query,
    /// Single layer opening inside a query.
    Layer,
    /// Merkle authentication path.
    Path,
}

impl fmt::Display for SerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerKind::Proof => write!(f, "proof"),
            SerKind::Query => write!(f, "query"),
            SerKind::Layer => write!(f, "layer"),
            SerKind::Path => write!(f, "path"),
        }
    }
}

/// Canonical serialization error surfaced while encoding or decoding data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SerError {
    /// Input ended before the expected number of bytes were read.
    #[error("unexpected end of input in {kind} field `{field}`")]
    UnexpectedEnd {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// A length prefix exceeded the supported bounds or remaining buffer.
    #[error("invalid length in {kind} field `{field}`")]
    InvalidLength {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Encountered an unexpected discriminant or non-canonical value.
    #[error("invalid value in {kind} field `{field}`")]
    InvalidValue {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Additional bytes remained after consuming the expected payload.
    #[error("{remaining} trailing bytes after {kind} at offset {consumed}")]
    TrailingBytes {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Position reached by the decoder.
        consumed: usize,
        /// Number of remaining bytes.
        remaining: usize,
    },
}

impl SerError {
    /// Creates an unexpected-end error helper.
    pub fn unexpected_end(kind: SerKind, field: &'static str) -> Self {
        SerError::UnexpectedEnd { kind, field }
    }

    /// Creates an invalid-length error helper.
    pub fn invalid_length(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidLength { kind, field }
    }

    /// Creates an invalid-value error helper.
    pub fn invalid_value(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidValue { kind, field }
    }

    /// Creates a trailing-bytes error helper.
    pub fn trailing_bytes(kind: SerKind, consumed: usize, remaining: usize) -> Self {
        SerError::TrailingBytes {
            kind,
            consumed,
            remaining,
        }
    }
}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;
