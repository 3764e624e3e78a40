/// Disk image sector translation

/// Builder for formatting new images
pub mod builder;
/// Sector address translation
pub mod geometry;
/// Sector definition and status
pub mod sector;

pub use builder::ImageBuilder;
pub use geometry::{BootLayout, Geometry, SectorLocation};
pub use sector::{Sector, SectorStatus};

use crate::error::{AtrError, Result};
use crate::format::{Density, ImageKind};
use crate::io::{self, Storage};
use log::trace;
use std::fs::File;
use std::path::Path;

/// An ATR or XFD image bound to its backing storage
///
/// The image owns `S`, which may itself be a borrow such as `&mut File` when
/// the caller wants to keep the handle. Reads and writes move the storage
/// cursor, so nothing else should use the handle while the image holds it.
#[derive(Debug)]
pub struct DiskImage<S> {
    storage: Option<S>,
    geometry: Option<Geometry>,
    changed: bool,
}

impl<S> DiskImage<S> {
    /// Create an empty image with no storage bound
    pub fn new() -> Self {
        Self {
            storage: None,
            geometry: None,
            changed: false,
        }
    }

    /// Check if storage is bound
    pub fn is_bound(&self) -> bool {
        self.geometry.is_some()
    }

    /// Release the bound storage, leaving the image empty
    pub fn unbind(&mut self) -> Option<S> {
        self.geometry = None;
        self.changed = false;
        self.storage.take()
    }

    /// Consume the image and return the bound storage
    pub fn into_storage(self) -> Option<S> {
        self.storage
    }

    /// Get the layout of the bound image
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Get the container type
    pub fn kind(&self) -> Option<ImageKind> {
        self.geometry.map(|g| g.kind)
    }

    /// Nominal sector size in bytes
    pub fn sector_size(&self) -> Option<u16> {
        self.geometry.map(|g| g.sector_size)
    }

    /// Number of sectors on the image (0 when nothing is bound)
    pub fn sector_count(&self) -> u16 {
        self.geometry.map(|g| g.sector_count()).unwrap_or(0)
    }

    /// Length of a sector, 128 for sectors 1-3 whatever the density
    pub fn sector_length(&self, sector: u16) -> Result<usize> {
        self.geometry.ok_or(AtrError::NotBound)?.sector_length(sector)
    }

    /// Density preset matching the image, if any
    pub fn density(&self) -> Option<Density> {
        self.geometry.and_then(|g| g.density())
    }

    /// Check for a double density image
    pub fn is_double_density(&self) -> bool {
        self.geometry.map(|g| g.is_double_density()).unwrap_or(false)
    }

    /// Check for an enhanced density image
    pub fn is_enhanced_density(&self) -> bool {
        self.geometry.map(|g| g.is_enhanced_density()).unwrap_or(false)
    }

    /// PERCOM block to advertise for the image, if it matches a preset
    pub fn percom_block(&self) -> Option<[u8; 12]> {
        self.density().map(|d| d.percom_block())
    }

    /// Check if any sector has been written since the storage was bound
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Mark the image as unchanged
    pub fn mark_unchanged(&mut self) {
        self.changed = false;
    }

    fn bound_mut(&mut self) -> Result<(&mut S, Geometry)> {
        match (self.storage.as_mut(), self.geometry) {
            (Some(storage), Some(geometry)) => Ok((storage, geometry)),
            _ => Err(AtrError::NotBound),
        }
    }
}

impl<S: Storage> DiskImage<S> {
    /// Create an image and bind it to storage
    pub fn with_storage(storage: S) -> Result<Self> {
        let mut image = Self::new();
        image.set_file(storage)?;
        Ok(image)
    }

    /// Bind storage, detecting ATR or raw layout from its contents
    ///
    /// On failure the previously bound storage stays in place.
    pub fn set_file(&mut self, mut storage: S) -> Result<()> {
        let geometry = io::probe(&mut storage)?;
        self.bind(storage, geometry);
        Ok(())
    }

    /// Bind storage whose kind is already known (e.g. from its extension)
    pub fn set_file_as(&mut self, mut storage: S, kind: ImageKind) -> Result<()> {
        let geometry = io::probe_as(&mut storage, kind)?;
        self.bind(storage, geometry);
        Ok(())
    }

    fn bind(&mut self, storage: S, geometry: Geometry) {
        self.storage = Some(storage);
        self.geometry = Some(geometry);
        self.changed = false;
    }

    /// Read a sector into a new buffer
    pub fn read_sector(&mut self, sector: u16) -> Result<Sector> {
        let (storage, geometry) = self.bound_mut()?;
        let location = geometry.locate(sector)?;

        trace!("read sector {} at {:#X}", sector, location.offset);
        let mut data = vec![0u8; location.length];
        storage.read_at(location.offset, &mut data)?;

        Ok(Sector::with_data(sector, data))
    }

    /// Read a sector into a caller-owned buffer, returning its length
    pub fn read_sector_into(&mut self, sector: u16, buf: &mut [u8]) -> Result<usize> {
        let (storage, geometry) = self.bound_mut()?;
        let location = geometry.locate(sector)?;

        if buf.len() < location.length {
            return Err(AtrError::LengthMismatch {
                sector,
                expected: location.length,
                actual: buf.len(),
            });
        }

        trace!("read sector {} at {:#X}", sector, location.offset);
        storage.read_at(location.offset, &mut buf[..location.length])?;

        Ok(location.length)
    }

    /// Write a sector
    ///
    /// `data` must be exactly the sector's length; nothing is written
    /// otherwise.
    pub fn write_sector(&mut self, sector: u16, data: &[u8]) -> Result<()> {
        let (storage, geometry) = self.bound_mut()?;
        let location = geometry.locate(sector)?;

        if data.len() != location.length {
            return Err(AtrError::LengthMismatch {
                sector,
                expected: location.length,
                actual: data.len(),
            });
        }

        trace!("write sector {} at {:#X}", sector, location.offset);
        storage.write_at(location.offset, data)?;

        self.changed = true;
        Ok(())
    }

    /// Format storage as a blank image and bind it
    pub fn format(&mut self, mut storage: S, density: Density, kind: ImageKind) -> Result<()> {
        io::write_blank(&mut storage, density, kind)?;
        self.set_file_as(storage, kind)
    }
}

impl DiskImage<File> {
    /// Open an ATR or XFD file from disk
    ///
    /// `.xfd` files are read as raw dumps; other files are detected from
    /// their first bytes.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        io::open_image(path)
    }

    /// Create a formatted image file, raw for `.xfd` and ATR otherwise
    pub fn create<P: AsRef<Path>>(path: P, density: Density) -> Result<Self> {
        io::create_image(path, density)
    }
}

impl<S> Default for DiskImage<S> {
    fn default() -> Self {
        Self::new()
    }
}
