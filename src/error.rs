// src/error.rs
//! Error types for the GPS tracker

use std::fmt;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug)]
pub enum TrackerError {
    Io(std::io::Error),
    Serial(tokio_serial::Error),
    Json(serde_json::Error),
    /// Coordinate field could not be split into degrees and minutes.
    MalformedCoordinate(String),
    /// Sentence checksum did not match its payload.
    ChecksumInvalid(String),
    /// Line is not a structurally valid NMEA sentence.
    UnparseableSentence(String),
    /// Line source could not be opened; fatal to a `start` attempt.
    SourceOpen(String),
    /// Transient read failure; the loop pauses and retries.
    SourceRead(String),
    /// A registered position callback panicked.
    Callback(String),
    Other(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Io(e) => write!(f, "IO error: {}", e),
            TrackerError::Serial(e) => write!(f, "Serial error: {}", e),
            TrackerError::Json(e) => write!(f, "JSON error: {}", e),
            TrackerError::MalformedCoordinate(msg) => write!(f, "Malformed coordinate: {}", msg),
            TrackerError::ChecksumInvalid(msg) => write!(f, "Checksum invalid: {}", msg),
            TrackerError::UnparseableSentence(msg) => write!(f, "Unparseable sentence: {}", msg),
            TrackerError::SourceOpen(msg) => write!(f, "Source open failed: {}", msg),
            TrackerError::SourceRead(msg) => write!(f, "Source read failed: {}", msg),
            TrackerError::Callback(msg) => write!(f, "Callback failed: {}", msg),
            TrackerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {}

impl From<std::io::Error> for TrackerError {
    fn from(error: std::io::Error) -> Self {
        TrackerError::Io(error)
    }
}

impl From<tokio_serial::Error> for TrackerError {
    fn from(error: tokio_serial::Error) -> Self {
        TrackerError::Serial(error)
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(error: serde_json::Error) -> Self {
        TrackerError::Json(error)
    }
}
