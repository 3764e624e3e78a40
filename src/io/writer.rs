/// Blank image writer

use crate::error::{AtrError, Result};
use crate::format::{AtrHeader, Density, ImageKind};
use crate::io::storage::Storage;
use log::debug;
use std::io::{self, SeekFrom};

/// Chunk size used when zero-filling the data region
const FILL_CHUNK: usize = 16 * 1024;

/// Write a freshly formatted, all-zero image of the given density
///
/// The storage should be empty or truncated. An ATR header fixes the data
/// size, so stale bytes past an ATR image are ignored. A raw image is sized
/// by its length, so stale bytes past one are an error.
pub fn write_blank<S: Storage + ?Sized>(
    storage: &mut S,
    density: Density,
    kind: ImageKind,
) -> Result<()> {
    storage.seek(SeekFrom::Start(0))?;

    if kind == ImageKind::Atr {
        let header = AtrHeader::for_density(density);
        storage.write_all(&header.to_bytes())?;
    }

    let zeros = [0u8; FILL_CHUNK];
    let mut remaining = density.total_size();
    while remaining > 0 {
        let chunk = remaining.min(FILL_CHUNK as u64) as usize;
        storage.write_all(&zeros[..chunk])?;
        remaining -= chunk as u64;
    }
    storage.flush()?;

    let expected = kind.header_size() + density.total_size();
    let written = storage.size()?;
    if written < expected {
        return Err(AtrError::Io(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("Formatted image is {} bytes, expected {}", written, expected),
        )));
    }
    if kind == ImageKind::Xfd && written != expected {
        return Err(AtrError::invalid_format(format!(
            "Raw image storage holds {} bytes past the formatted {}",
            written - expected,
            expected
        )));
    }

    debug!("Formatted {} {} image ({} bytes)", density, kind.name(), expected);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::constants::*;
    use std::io::Cursor;

    #[test]
    fn test_write_blank_atr() {
        let mut store = Cursor::new(Vec::new());
        write_blank(&mut store, Density::SsDd40, ImageKind::Atr).unwrap();

        let data = store.into_inner();
        assert_eq!(data.len(), ATR_HEADER_SIZE + FORMAT_SS_DD_40 as usize);
        assert_eq!(&data[..2], ATR_MAGIC);
        assert_eq!(&data[4..6], &[0x00, 0x01]);
        assert!(data[ATR_HEADER_SIZE..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_blank_raw() {
        let mut store = Cursor::new(Vec::new());
        write_blank(&mut store, Density::SsEd35, ImageKind::Xfd).unwrap();

        let data = store.into_inner();
        assert_eq!(data.len(), FORMAT_SS_ED_35 as usize);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_blank_overwrites_existing() {
        let mut store = Cursor::new(vec![0xFFu8; FORMAT_SS_SD_40 as usize]);
        write_blank(&mut store, Density::SsSd40, ImageKind::Xfd).unwrap();

        assert!(store.get_ref().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_blank_raw_rejects_stale_tail() {
        let mut store = Cursor::new(vec![0xFFu8; 200_000]);
        let result = write_blank(&mut store, Density::SsSd40, ImageKind::Xfd);
        assert!(matches!(result, Err(AtrError::InvalidFormat(_))));
    }

    #[test]
    fn test_write_blank_atr_ignores_stale_tail() {
        let mut store = Cursor::new(vec![0xFFu8; 200_000]);
        write_blank(&mut store, Density::SsSd40, ImageKind::Atr).unwrap();

        let data = store.into_inner();
        let end = ATR_HEADER_SIZE + FORMAT_SS_SD_40 as usize;
        assert_eq!(&data[..2], ATR_MAGIC);
        assert!(data[ATR_HEADER_SIZE..end].iter().all(|&b| b == 0));
        assert_eq!(data[end], 0xFF);
    }
}
