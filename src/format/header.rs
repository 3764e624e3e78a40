/// ATR header parsing and encoding

use crate::error::{AtrError, Result};
use crate::format::constants::*;
use crate::format::density::Density;

/// The 16-byte header at the start of an ATR file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtrHeader {
    /// Signature word, 0x0296 for a valid ATR
    pub signature: u16,
    /// Low 16 bits of the data size in paragraphs
    pub pars: u16,
    /// Nominal sector size
    pub sector_size: u16,
    /// High 8 bits of the data size in paragraphs
    pub pars_high: u8,
    /// Historically unused, written as zero
    pub crc: u32,
    /// Unused, written as zero
    pub unused: u32,
    /// Flags, written as zero
    pub flags: u8,
}

impl AtrHeader {
    /// Build a header describing `data_size` bytes of `sector_size` sectors
    ///
    /// Sizes are stored in 16-byte paragraphs, so a size that is not a
    /// multiple of 16 is rounded down.
    pub fn new(data_size: u64, sector_size: u16) -> Self {
        let paragraphs = data_size / ATR_PARAGRAPH_SIZE;
        Self {
            signature: ATR_SIGNATURE,
            pars: (paragraphs & 0xFFFF) as u16,
            sector_size,
            pars_high: ((paragraphs >> 16) & 0xFF) as u8,
            crc: 0,
            unused: 0,
            flags: 0,
        }
    }

    /// Build the header for a freshly formatted disk
    pub fn for_density(density: Density) -> Self {
        Self::new(density.total_size(), density.sector_size())
    }

    /// Parse a header from the first bytes of a file
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ATR_HEADER_SIZE {
            return Err(AtrError::invalid_format(format!(
                "ATR header needs {} bytes, got {}",
                ATR_HEADER_SIZE,
                bytes.len()
            )));
        }

        let word = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        let long = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        let header = Self {
            signature: word(ATR_SIGNATURE_OFFSET),
            pars: word(ATR_PARS_OFFSET),
            sector_size: word(ATR_SECTOR_SIZE_OFFSET),
            pars_high: bytes[ATR_PARS_HIGH_OFFSET],
            crc: long(ATR_CRC_OFFSET),
            unused: long(ATR_UNUSED_OFFSET),
            flags: bytes[ATR_FLAGS_OFFSET],
        };

        if header.signature != ATR_SIGNATURE {
            return Err(AtrError::invalid_format(format!(
                "Bad ATR signature {:#06X}",
                header.signature
            )));
        }

        Ok(header)
    }

    /// Encode the header as it is stored on disk
    pub fn to_bytes(&self) -> [u8; ATR_HEADER_SIZE] {
        let mut bytes = [0u8; ATR_HEADER_SIZE];
        bytes[ATR_SIGNATURE_OFFSET..ATR_SIGNATURE_OFFSET + 2]
            .copy_from_slice(&self.signature.to_le_bytes());
        bytes[ATR_PARS_OFFSET..ATR_PARS_OFFSET + 2].copy_from_slice(&self.pars.to_le_bytes());
        bytes[ATR_SECTOR_SIZE_OFFSET..ATR_SECTOR_SIZE_OFFSET + 2]
            .copy_from_slice(&self.sector_size.to_le_bytes());
        bytes[ATR_PARS_HIGH_OFFSET] = self.pars_high;
        bytes[ATR_CRC_OFFSET..ATR_CRC_OFFSET + 4].copy_from_slice(&self.crc.to_le_bytes());
        bytes[ATR_UNUSED_OFFSET..ATR_UNUSED_OFFSET + 4].copy_from_slice(&self.unused.to_le_bytes());
        bytes[ATR_FLAGS_OFFSET] = self.flags;
        bytes
    }

    /// Data size in bytes declared by the header
    pub fn data_size(&self) -> u64 {
        (((self.pars_high as u64) << 16) | self.pars as u64) * ATR_PARAGRAPH_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_double_density_header() {
        // 183936 / 16 = 11496 = 0x2CE8
        let bytes = [
            0x96, 0x02, 0xE8, 0x2C, 0x00, 0x01, 0x00, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        let header = AtrHeader::parse(&bytes).unwrap();

        assert_eq!(header.sector_size, 256);
        assert_eq!(header.data_size(), FORMAT_SS_DD_40);
    }

    #[test]
    fn test_high_paragraph_byte() {
        let header = AtrHeader::new(16 * 0x01_0010, 256);
        assert_eq!(header.pars, 0x0010);
        assert_eq!(header.pars_high, 0x01);
        assert_eq!(header.data_size(), 16 * 0x01_0010);
    }

    #[test]
    fn test_encode_layout() {
        let bytes = AtrHeader::for_density(Density::SsSd40).to_bytes();
        // 92160 / 16 = 5760 = 0x1680
        assert_eq!(&bytes[..8], &[0x96, 0x02, 0x80, 0x16, 0x80, 0x00, 0x00, 0x00]);
        assert!(bytes[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parse_encoded() {
        for density in Density::ALL {
            let header = AtrHeader::for_density(density);
            let parsed = AtrHeader::parse(&header.to_bytes()).unwrap();
            assert_eq!(parsed, header);
            assert_eq!(parsed.data_size(), density.total_size());
        }
    }

    #[test]
    fn test_parse_too_short() {
        let result = AtrHeader::parse(&[0x96, 0x02, 0x00]);
        assert!(matches!(result, Err(AtrError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_bad_signature() {
        let bytes = [0u8; ATR_HEADER_SIZE];
        assert!(AtrHeader::parse(&bytes).is_err());
    }
}
