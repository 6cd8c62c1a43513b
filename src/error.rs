//! Error type shared by the library.
//!
//! Nothing on the audio or refresh path returns these; they surface only from
//! setup operations (loading configuration, opening devices).

/// Errors that can occur while setting up the laboratory
#[derive(Debug)]
pub enum LabError {
    /// Reading a configuration file failed
    Io(std::io::Error),
    /// A configuration file could not be parsed
    #[cfg(feature = "serde")]
    Parse(toml::de::Error),
    /// A configuration value is outside what the pipeline supports
    InvalidConfig { field: &'static str, reason: String },
    /// No capture device, or the capture stream could not be opened
    LiveInput(String),
    /// The monitor output stream could not be built or started
    Stream(String),
}

impl std::fmt::Display for LabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabError::Io(err) => write!(f, "failed to read configuration: {}", err),
            #[cfg(feature = "serde")]
            LabError::Parse(err) => write!(f, "failed to parse configuration: {}", err),
            LabError::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration value for `{}`: {}", field, reason)
            }
            LabError::LiveInput(msg) => write!(f, "live input unavailable: {}", msg),
            LabError::Stream(msg) => write!(f, "audio stream error: {}", msg),
        }
    }
}

impl std::error::Error for LabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LabError::Io(err) => Some(err),
            #[cfg(feature = "serde")]
            LabError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        LabError::Io(err)
    }
}

#[cfg(feature = "serde")]
impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        LabError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message_names_field() {
        let err = LabError::InvalidConfig {
            field: "audio.fft_size",
            reason: "must be a power of two".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("audio.fft_size"), "got: {}", msg);
        assert!(msg.contains("power of two"), "got: {}", msg);
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error;

        let err = LabError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(err.source().is_some());
    }
}
