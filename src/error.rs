use thiserror::Error;

/// Errors returned by the contact-tracing pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A record carries a coordinate outside the valid geographic range.
    #[error("invalid coordinate at record {index}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Index of the offending record in the dataset.
        index: usize,
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },

    /// The queried identity has no records in the dataset.
    #[error("identity not found: {identity}")]
    IdentityNotFound {
        /// The identity as supplied by the caller.
        identity: String,
    },

    /// A line of the record feed could not be parsed.
    #[error("malformed record on line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number in the feed.
        line: usize,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
