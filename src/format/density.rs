/// Atari disk density presets

use crate::format::constants::*;
use std::fmt;

/// Recording mode used by a density
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
    /// FM (Frequency Modulation) - single density
    FM,
    /// MFM (Modified Frequency Modulation) - enhanced and double density
    MFM,
}

/// Disk density preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    /// Single-sided single density, 35 tracks
    SsSd35,
    /// Single-sided single density, 40 tracks (810 drive)
    SsSd40,
    /// Single-sided enhanced density, 35 tracks
    SsEd35,
    /// Single-sided enhanced density, 40 tracks (1050 drive)
    SsEd40,
    /// Single-sided double density, 35 tracks
    SsDd35,
    /// Single-sided double density, 40 tracks (XF551 and modified drives)
    SsDd40,
}

impl Density {
    /// Every preset, smallest first
    pub const ALL: [Density; 6] = [
        Density::SsSd35,
        Density::SsSd40,
        Density::SsEd35,
        Density::SsEd40,
        Density::SsDd35,
        Density::SsDd40,
    ];

    /// Get a human-readable name for this density
    pub fn name(&self) -> &'static str {
        match self {
            Density::SsSd35 => "SS/SD 35-track",
            Density::SsSd40 => "SS/SD 40-track",
            Density::SsEd35 => "SS/ED 35-track",
            Density::SsEd40 => "SS/ED 40-track",
            Density::SsDd35 => "SS/DD 35-track",
            Density::SsDd40 => "SS/DD 40-track",
        }
    }

    /// Look up a density by console alias
    ///
    /// Accepts `sd`, `ed` and `dd` (40 tracks) as well as the explicit
    /// `sd35`, `sd40`, `ed35`, `ed40`, `dd35` and `dd40`.
    pub fn from_name(name: &str) -> Option<Density> {
        match name.to_ascii_lowercase().as_str() {
            "sd35" => Some(Density::SsSd35),
            "sd" | "sd40" => Some(Density::SsSd40),
            "ed35" => Some(Density::SsEd35),
            "ed" | "ed40" => Some(Density::SsEd40),
            "dd35" => Some(Density::SsDd35),
            "dd" | "dd40" => Some(Density::SsDd40),
            _ => None,
        }
    }

    /// Find the preset matching a data size and nominal sector size
    pub fn from_geometry(data_size: u64, sector_size: u16) -> Option<Density> {
        Density::ALL
            .into_iter()
            .find(|d| d.total_size() == data_size && d.sector_size() == sector_size)
    }

    /// Number of tracks
    pub fn tracks(&self) -> u8 {
        match self {
            Density::SsSd35 | Density::SsEd35 | Density::SsDd35 => 35,
            Density::SsSd40 | Density::SsEd40 | Density::SsDd40 => 40,
        }
    }

    /// Sectors per track
    pub fn sectors_per_track(&self) -> u16 {
        if self.is_enhanced() {
            26
        } else {
            18
        }
    }

    /// Nominal sector size in bytes (sectors 1-3 are always 128)
    pub fn sector_size(&self) -> u16 {
        if self.is_double() {
            DOUBLE_SECTOR_SIZE
        } else {
            SINGLE_SECTOR_SIZE
        }
    }

    /// Total number of sectors
    pub fn sector_count(&self) -> u16 {
        self.tracks() as u16 * self.sectors_per_track()
    }

    /// Total data size in bytes, excluding any header
    pub fn total_size(&self) -> u64 {
        match self {
            Density::SsSd35 => FORMAT_SS_SD_35,
            Density::SsSd40 => FORMAT_SS_SD_40,
            Density::SsEd35 => FORMAT_SS_ED_35,
            Density::SsEd40 => FORMAT_SS_ED_40,
            Density::SsDd35 => FORMAT_SS_DD_35,
            Density::SsDd40 => FORMAT_SS_DD_40,
        }
    }

    /// Check for an enhanced (medium) density preset
    pub fn is_enhanced(&self) -> bool {
        matches!(self, Density::SsEd35 | Density::SsEd40)
    }

    /// Check for a double density preset
    pub fn is_double(&self) -> bool {
        matches!(self, Density::SsDd35 | Density::SsDd40)
    }

    /// Recording mode
    pub fn recording_mode(&self) -> RecordingMode {
        match self {
            Density::SsSd35 | Density::SsSd40 => RecordingMode::FM,
            _ => RecordingMode::MFM,
        }
    }

    /// PERCOM configuration block advertised for this density
    ///
    /// Layout: tracks, step rate, sectors per track (big-endian), sides - 1,
    /// density flag (0 = FM, 4 = MFM), bytes per sector (big-endian),
    /// drive present (0xFF), three unused bytes.
    pub fn percom_block(&self) -> [u8; 12] {
        let spt = self.sectors_per_track().to_be_bytes();
        let bps = self.sector_size().to_be_bytes();
        let density_flag = match self.recording_mode() {
            RecordingMode::FM => 0x00,
            RecordingMode::MFM => 0x04,
        };

        [
            self.tracks(),
            0x01,
            spt[0],
            spt[1],
            0x00,
            density_flag,
            bps[0],
            bps[1],
            0xFF,
            0x00,
            0x00,
            0x00,
        ]
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_counts() {
        assert_eq!(Density::SsSd35.sector_count(), 630);
        assert_eq!(Density::SsSd40.sector_count(), 720);
        assert_eq!(Density::SsEd35.sector_count(), 910);
        assert_eq!(Density::SsEd40.sector_count(), 1040);
        assert_eq!(Density::SsDd35.sector_count(), 630);
        assert_eq!(Density::SsDd40.sector_count(), 720);
    }

    #[test]
    fn test_total_size_matches_geometry() {
        for density in Density::ALL {
            let count = density.sector_count() as u64;
            let expected = if density.is_double() {
                BOOT_AREA_SIZE + (count - 3) * DOUBLE_SECTOR_SIZE as u64
            } else {
                count * SINGLE_SECTOR_SIZE as u64
            };
            assert_eq!(density.total_size(), expected, "{}", density);
        }
    }

    #[test]
    fn test_from_geometry() {
        assert_eq!(
            Density::from_geometry(FORMAT_SS_DD_40, 256),
            Some(Density::SsDd40)
        );
        assert_eq!(
            Density::from_geometry(FORMAT_SS_ED_35, 128),
            Some(Density::SsEd35)
        );
        assert_eq!(Density::from_geometry(FORMAT_SS_DD_40, 128), None);
        assert_eq!(Density::from_geometry(184_320, 256), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Density::from_name("sd"), Some(Density::SsSd40));
        assert_eq!(Density::from_name("ED35"), Some(Density::SsEd35));
        assert_eq!(Density::from_name("dd"), Some(Density::SsDd40));
        assert_eq!(Density::from_name("qd"), None);
    }

    #[test]
    fn test_percom_single_density() {
        assert_eq!(
            Density::SsSd40.percom_block(),
            [40, 1, 0, 18, 0, 0, 0, 128, 0xFF, 0, 0, 0]
        );
    }

    #[test]
    fn test_percom_double_density() {
        assert_eq!(
            Density::SsDd40.percom_block(),
            [40, 1, 0, 18, 0, 4, 1, 0, 0xFF, 0, 0, 0]
        );
        assert_eq!(Density::SsEd40.percom_block()[3], 26);
        assert_eq!(Density::SsEd40.percom_block()[5], 4);
    }
}
