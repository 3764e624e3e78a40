/// ATR and XFD format definitions

/// Format constants
pub mod constants;
/// Density presets
pub mod density;
/// ATR header
pub mod header;

pub use constants::*;
pub use density::{Density, RecordingMode};
pub use header::AtrHeader;

use std::path::Path;

/// Disk image container type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// ATR image with a 16-byte header
    Atr,
    /// Raw XFD sector dump with no header
    Xfd,
}

impl ImageKind {
    /// Get the magic bytes for this kind
    pub fn magic_bytes(&self) -> &'static [u8] {
        match self {
            ImageKind::Atr => ATR_MAGIC,
            ImageKind::Xfd => &[], // Raw images have no magic bytes
        }
    }

    /// Get a human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            ImageKind::Atr => "ATR",
            ImageKind::Xfd => "Raw XFD",
        }
    }

    /// Size of the header preceding the sector data
    pub fn header_size(&self) -> u64 {
        match self {
            ImageKind::Atr => ATR_HEADER_SIZE as u64,
            ImageKind::Xfd => 0,
        }
    }

    /// Pick the kind for a new file from its extension
    ///
    /// `.xfd` files are raw, everything else gets an ATR header.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        if is_xfd_file(path) {
            ImageKind::Xfd
        } else {
            ImageKind::Atr
        }
    }
}

/// Detect the image kind from the first bytes of a file
pub fn detect_kind(magic: &[u8]) -> ImageKind {
    if magic.starts_with(ATR_MAGIC) {
        ImageKind::Atr
    } else {
        ImageKind::Xfd
    }
}

/// Check if a file is a raw XFD image based on extension
pub fn is_xfd_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xfd"))
        .unwrap_or(false)
}
