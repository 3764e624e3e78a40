use thiserror::Error;

/// Result type alias for disk image operations
pub type Result<T> = std::result::Result<T, AtrError>;

/// Errors that can occur when working with ATR and XFD images
#[derive(Debug, Error)]
pub enum AtrError {
    /// I/O error occurred while reading or writing the underlying storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or self-contradictory image layout
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Header declares a sector size other than 128 or 256 bytes
    #[error("Unsupported sector size: {0} bytes")]
    UnsupportedSectorSize(u16),

    /// Sector number maps outside the image data region
    #[error("Invalid sector {sector} (max: {max})")]
    SectorOutOfRange {
        /// Requested sector number
        sector: u16,
        /// Highest valid sector number
        max: u16,
    },

    /// Data length does not match the sector length at that position
    #[error("Sector {sector} holds {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Sector number
        sector: u16,
        /// Length of the sector on this image
        expected: usize,
        /// Length supplied by the caller
        actual: usize,
    },

    /// No storage has been bound to the image
    #[error("No disk image loaded")]
    NotBound,
}

impl AtrError {
    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        AtrError::InvalidFormat(message.into())
    }
}
