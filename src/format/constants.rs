/// ATR and XFD layout constants

/// ATR signature word (stored little-endian as 0x96, 0x02)
pub const ATR_SIGNATURE: u16 = 0x0296;

/// ATR signature as it appears at file offset 0
pub const ATR_MAGIC: &[u8] = &[0x96, 0x02];

/// Size of the ATR header
pub const ATR_HEADER_SIZE: usize = 16;

/// ATR size fields count 16-byte paragraphs
pub const ATR_PARAGRAPH_SIZE: u64 = 16;

/// Offset of the signature in the ATR header
pub const ATR_SIGNATURE_OFFSET: usize = 0;

/// Offset of the low 16 bits of the paragraph count
pub const ATR_PARS_OFFSET: usize = 2;

/// Offset of the nominal sector size
pub const ATR_SECTOR_SIZE_OFFSET: usize = 4;

/// Offset of the high 8 bits of the paragraph count
pub const ATR_PARS_HIGH_OFFSET: usize = 6;

/// Offset of the (historically unused) CRC
pub const ATR_CRC_OFFSET: usize = 7;

/// Offset of the unused word
pub const ATR_UNUSED_OFFSET: usize = 11;

/// Offset of the flags byte
pub const ATR_FLAGS_OFFSET: usize = 15;

/// Sector size of single and enhanced density disks
pub const SINGLE_SECTOR_SIZE: u16 = 128;

/// Sector size of double density disks (sectors 4 and up)
pub const DOUBLE_SECTOR_SIZE: u16 = 256;

/// Sectors 1-3 are always 128 bytes, even on double density disks
pub const BOOT_SECTOR_COUNT: u16 = 3;

/// Bytes taken by the boot sectors on a packed double density image
pub const BOOT_AREA_SIZE: u64 = BOOT_SECTOR_COUNT as u64 * SINGLE_SECTOR_SIZE as u64;

/// SS/SD 35-track total data size
pub const FORMAT_SS_SD_35: u64 = 80_640;

/// SS/SD 40-track total data size
pub const FORMAT_SS_SD_40: u64 = 92_160;

/// SS/ED 35-track total data size
pub const FORMAT_SS_ED_35: u64 = 116_480;

/// SS/ED 40-track total data size
pub const FORMAT_SS_ED_40: u64 = 133_120;

/// SS/DD 35-track total data size
pub const FORMAT_SS_DD_35: u64 = 160_896;

/// SS/DD 40-track total data size
pub const FORMAT_SS_DD_40: u64 = 183_936;

/// Raw images larger than this cannot be all 128-byte sectors
pub const RAW_SINGLE_SECTOR_LIMIT: u64 = FORMAT_SS_ED_40;

/// Check whether a sector size is one the Atari drives use
#[inline]
pub fn is_valid_sector_size(size: u16) -> bool {
    size == SINGLE_SECTOR_SIZE || size == DOUBLE_SECTOR_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_matches_signature() {
        assert_eq!(ATR_MAGIC, &ATR_SIGNATURE.to_le_bytes());
    }

    #[test]
    fn test_header_fields_fit() {
        assert_eq!(ATR_FLAGS_OFFSET + 1, ATR_HEADER_SIZE);
        assert_eq!(ATR_UNUSED_OFFSET - ATR_CRC_OFFSET, 4);
    }

    #[test]
    fn test_valid_sector_sizes() {
        assert!(is_valid_sector_size(128));
        assert!(is_valid_sector_size(256));
        assert!(!is_valid_sector_size(512));
        assert!(!is_valid_sector_size(0));
    }

    #[test]
    fn test_format_sizes_are_paragraph_aligned() {
        for size in [
            FORMAT_SS_SD_35,
            FORMAT_SS_SD_40,
            FORMAT_SS_ED_35,
            FORMAT_SS_ED_40,
            FORMAT_SS_DD_35,
            FORMAT_SS_DD_40,
        ] {
            assert_eq!(size % ATR_PARAGRAPH_SIZE, 0);
        }
    }
}
