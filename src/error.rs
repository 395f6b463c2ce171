//! Error types and handling for the flight weather assessment

use thiserror::Error;

/// Main error type for the flight weather assessment
#[derive(Error, Debug)]
pub enum FlightWeatherError {
    /// A route assessment was requested without any airports
    #[error("Route contains no airports")]
    EmptyRoute,

    /// The upstream weather provider answered with a failure
    #[error("API Error: {message}")]
    UpstreamFetch {
        /// HTTP status code, when the failure came from a response
        status: Option<u16>,
        message: String,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A projection could not produce its artifact
    #[error("Render error: {message}")]
    Render { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FlightWeatherError {
    /// Create a new upstream fetch error
    pub fn upstream<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::UpstreamFetch {
            status,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// True for failures caused by the route data rather than by a renderer
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyRoute | Self::UpstreamFetch { .. } | Self::Validation { .. }
        )
    }

    /// True for failures raised while producing an output artifact
    #[must_use]
    pub fn is_render_error(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FlightWeatherError::EmptyRoute => {
                "No airports were found along this route.".to_string()
            }
            FlightWeatherError::UpstreamFetch { message, .. } => format!("Error: {message}"),
            FlightWeatherError::Validation { message } => format!("Invalid input: {message}"),
            FlightWeatherError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FlightWeatherError::Render { .. } => {
                "The report could not be generated. Please try again.".to_string()
            }
            FlightWeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

/// Raw weather text that is absent or carries a provider failure marker.
///
/// Never fatal: callers log it and substitute a sentinel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("weather data missing or unavailable: {reason}")]
pub struct MissingWeatherData {
    pub reason: String,
}
