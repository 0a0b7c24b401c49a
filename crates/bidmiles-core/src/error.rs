use thiserror::Error;

use crate::geo::Axis;

/// A coordinate string could not be normalized into a [`crate::GeoPoint`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected two coordinate values, found {found}")]
    InsufficientTokens { found: usize },

    #[error("\"{token}\" is not a number")]
    InvalidNumber { token: String },

    #[error("{axis} {value} is outside [{min}, {max}]")]
    OutOfRange {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Cardinal-form input that is not exactly `<lat> <N|S> <lon> <E|W>`.
    #[error("malformed hemisphere notation: {reason}")]
    MalformedHemisphere { reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// The office location could not be established. Fatal for the whole run.
#[derive(Debug, Error)]
pub enum OfficeError {
    #[error("geocoding returned no features for office address \"{address}\"")]
    NoFeatures { address: String },

    #[error("geocoding office address \"{address}\" failed: {source}")]
    Provider {
        address: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
