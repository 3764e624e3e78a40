/// Sector data structures

/// Sector status classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorStatus {
    /// Contains only zero bytes, as left by formatting
    Blank,
    /// Contains a single repeated non-zero byte
    Filler,
    /// Contains data (in use)
    InUse,
}

impl std::fmt::Display for SectorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectorStatus::Blank => write!(f, "Blank"),
            SectorStatus::Filler => write!(f, "Filler"),
            SectorStatus::InUse => write!(f, "In Use"),
        }
    }
}

/// A sector read from a disk image
///
/// Each read returns its own buffer; nothing is shared between reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    /// Sector number (1-based)
    pub number: u16,
    /// Sector data
    data: Vec<u8>,
}

impl Sector {
    /// Create a sector with specific data
    pub fn with_data(number: u16, data: Vec<u8>) -> Self {
        Self { number, data }
    }

    /// Get a reference to the sector data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the sector data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Sector length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sector holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Analyze the sector status based on data content
    pub fn status(&self) -> SectorStatus {
        let first_byte = match self.data.first() {
            Some(&b) => b,
            None => return SectorStatus::Blank,
        };

        if self.data.iter().all(|&b| b == first_byte) {
            if first_byte == 0 {
                SectorStatus::Blank
            } else {
                SectorStatus::Filler
            }
        } else {
            SectorStatus::InUse
        }
    }
}

impl AsRef<[u8]> for Sector {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
