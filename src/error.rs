//! Error handling for Silentium
//!
//! The engine itself never surfaces errors to its host; everything fallible
//! lives at the device bring-up, offline render, and CLI boundaries.

use thiserror::Error;

/// Result type alias for Silentium operations
pub type Result<T> = std::result::Result<T, SilentiumError>;

/// Main error type for Silentium operations
#[derive(Error, Debug)]
pub enum SilentiumError {
    // Audio Device Errors
    #[error("No audio output device available")]
    DeviceUnavailable,

    #[error("Failed to build audio stream: {reason}")]
    StreamBuild { reason: String },

    #[error("Unsupported output sample format: {format}")]
    UnsupportedSampleFormat { format: String },

    // Render Errors
    #[error("Cannot render: no tone selected")]
    NoToneSelected,

    #[error("Unsupported bit depth: {bits} (only 16, 24, 32 supported)")]
    UnsupportedBitDepth { bits: u16 },

    // Input Parsing Errors (CLI boundary)
    #[error("Unknown waveform: {name}")]
    UnknownWaveform { name: String },

    #[error("Unsupported frequency: {hz} Hz (choose 432, 528 or 639)")]
    UnsupportedFrequency { hz: u32 },

    #[error("Invalid volume: {value} (use low/medium/high or a number in 0..1)")]
    InvalidVolume { value: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SilentiumError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SilentiumError::DeviceUnavailable => "DEVICE_UNAVAILABLE",
            SilentiumError::StreamBuild { .. } => "STREAM_BUILD",
            SilentiumError::UnsupportedSampleFormat { .. } => "UNSUPPORTED_SAMPLE_FORMAT",
            SilentiumError::NoToneSelected => "NO_TONE_SELECTED",
            SilentiumError::UnsupportedBitDepth { .. } => "UNSUPPORTED_BIT_DEPTH",
            SilentiumError::UnknownWaveform { .. } => "UNKNOWN_WAVEFORM",
            SilentiumError::UnsupportedFrequency { .. } => "UNSUPPORTED_FREQUENCY",
            SilentiumError::InvalidVolume { .. } => "INVALID_VOLUME",
            SilentiumError::Io(_) => "IO_ERROR",
            SilentiumError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Parse errors are recoverable (the caller can fix the input); a
    /// missing or misconfigured audio device is not; the engine stays in
    /// its silent state for the rest of the session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SilentiumError::NoToneSelected => true,
            SilentiumError::UnsupportedBitDepth { .. } => true,
            SilentiumError::UnknownWaveform { .. } => true,
            SilentiumError::UnsupportedFrequency { .. } => true,
            SilentiumError::InvalidVolume { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SilentiumError::DeviceUnavailable;
        assert_eq!(err.error_code(), "DEVICE_UNAVAILABLE");

        let err = SilentiumError::UnknownWaveform {
            name: "pulse".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_WAVEFORM");
    }

    #[test]
    fn test_recoverable() {
        assert!(SilentiumError::UnsupportedFrequency { hz: 440 }.is_recoverable());
        assert!(!SilentiumError::DeviceUnavailable.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = SilentiumError::UnsupportedFrequency { hz: 440 };
        assert_eq!(
            err.to_string(),
            "Unsupported frequency: 440 Hz (choose 432, 528 or 639)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SilentiumError = io_err.into();
        assert!(matches!(err, SilentiumError::Io(_)));
    }
}
