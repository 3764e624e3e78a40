/// Image detection and loading

use crate::error::{AtrError, Result};
use crate::format::constants::*;
use crate::format::{detect_kind, AtrHeader, ImageKind};
use crate::image::Geometry;
use crate::io::storage::Storage;
use log::{debug, warn};

/// Work out the geometry of an image from its contents
///
/// A file starting with the ATR signature is read as ATR, anything else as
/// a raw sector dump.
pub fn probe<S: Storage + ?Sized>(storage: &mut S) -> Result<Geometry> {
    let file_size = storage.size()?;

    let kind = if file_size >= ATR_MAGIC.len() as u64 {
        let mut magic = [0u8; 2];
        storage.read_at(0, &mut magic)?;
        detect_kind(&magic)
    } else {
        ImageKind::Xfd
    };

    load(storage, kind, file_size)
}

/// Work out the geometry of an image whose kind the caller already knows
///
/// Used for the `.xfd` extension convention: a raw dump whose first sector
/// happens to begin with 0x96 0x02 must not be mistaken for an ATR.
pub fn probe_as<S: Storage + ?Sized>(storage: &mut S, kind: ImageKind) -> Result<Geometry> {
    let file_size = storage.size()?;
    load(storage, kind, file_size)
}

fn load<S: Storage + ?Sized>(storage: &mut S, kind: ImageKind, file_size: u64) -> Result<Geometry> {
    let geometry = match kind {
        ImageKind::Atr => read_atr(storage, file_size)?,
        ImageKind::Xfd => read_raw(file_size)?,
    };

    debug!(
        "Loaded {} image: {} data bytes, {}-byte sectors, {} sectors",
        geometry.kind.name(),
        geometry.data_size,
        geometry.sector_size,
        geometry.sector_count()
    );

    Ok(geometry)
}

fn read_atr<S: Storage + ?Sized>(storage: &mut S, file_size: u64) -> Result<Geometry> {
    if file_size < ATR_HEADER_SIZE as u64 {
        return Err(AtrError::invalid_format(format!(
            "Truncated ATR header: file is {} bytes",
            file_size
        )));
    }

    let mut bytes = [0u8; ATR_HEADER_SIZE];
    storage.read_at(0, &mut bytes)?;
    let header = AtrHeader::parse(&bytes)?;
    let geometry = Geometry::from_atr_header(&header, file_size)?;

    if geometry.file_size() < file_size {
        debug!(
            "Ignoring {} bytes past the declared ATR data",
            file_size - geometry.file_size()
        );
    }

    Ok(geometry)
}

fn read_raw(file_size: u64) -> Result<Geometry> {
    let geometry = Geometry::raw(file_size)?;

    if file_size % SINGLE_SECTOR_SIZE as u64 != 0 {
        warn!(
            "Raw image size {} is not a whole number of sectors",
            file_size
        );
    }

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Density;
    use std::io::Cursor;

    fn atr_image(density: Density) -> Cursor<Vec<u8>> {
        let mut data = AtrHeader::for_density(density).to_bytes().to_vec();
        data.resize(ATR_HEADER_SIZE + density.total_size() as usize, 0);
        Cursor::new(data)
    }

    #[test]
    fn test_probe_atr() {
        let mut store = atr_image(Density::SsDd40);
        let geometry = probe(&mut store).unwrap();

        assert_eq!(geometry.kind, ImageKind::Atr);
        assert_eq!(geometry.header_size, 16);
        assert_eq!(geometry.data_size, FORMAT_SS_DD_40);
        assert_eq!(geometry.sector_size, 256);
    }

    #[test]
    fn test_probe_raw() {
        let mut store = Cursor::new(vec![0u8; FORMAT_SS_ED_40 as usize]);
        let geometry = probe(&mut store).unwrap();

        assert_eq!(geometry.kind, ImageKind::Xfd);
        assert_eq!(geometry.header_size, 0);
        assert_eq!(geometry.sector_size, 128);
        assert!(geometry.is_enhanced_density());
    }

    #[test]
    fn test_probe_truncated_atr() {
        let mut store = Cursor::new(vec![0x96, 0x02, 0x80, 0x16, 0x80]);
        assert!(matches!(probe(&mut store), Err(AtrError::InvalidFormat(_))));
    }

    #[test]
    fn test_probe_tiny_file() {
        let mut store = Cursor::new(vec![0x96]);
        assert!(probe(&mut store).is_err());

        let mut store = Cursor::new(Vec::new());
        assert!(probe(&mut store).is_err());
    }

    #[test]
    fn test_probe_bad_sector_size() {
        let mut store = atr_image(Density::SsSd40);
        store.get_mut()[ATR_SECTOR_SIZE_OFFSET] = 0x00;
        store.get_mut()[ATR_SECTOR_SIZE_OFFSET + 1] = 0x02;

        assert!(matches!(
            probe(&mut store),
            Err(AtrError::UnsupportedSectorSize(512))
        ));
    }

    #[test]
    fn test_probe_as_raw_ignores_magic() {
        let mut data = vec![0u8; FORMAT_SS_SD_40 as usize];
        data[0] = 0x96;
        data[1] = 0x02;
        let mut store = Cursor::new(data);

        let geometry = probe_as(&mut store, ImageKind::Xfd).unwrap();
        assert_eq!(geometry.kind, ImageKind::Xfd);
        assert_eq!(geometry.data_size, FORMAT_SS_SD_40);
    }

    #[test]
    fn test_probe_as_atr_requires_signature() {
        let mut store = Cursor::new(vec![0u8; FORMAT_SS_SD_40 as usize]);
        assert!(probe_as(&mut store, ImageKind::Atr).is_err());
    }

    #[test]
    fn test_probe_atr_trailing_bytes() {
        let mut store = atr_image(Density::SsSd40);
        store.get_mut().extend_from_slice(&[0u8; 128]);

        let geometry = probe(&mut store).unwrap();
        assert_eq!(geometry.data_size, FORMAT_SS_SD_40);
        assert_eq!(geometry.sector_count(), 720);
    }
}
