/// Sector address translation
///
/// Atari drives number sectors from 1. On double density disks sectors 1-3
/// are still 128 bytes, so the byte offset of a sector is not a simple
/// multiple of the sector size. Every read, write and capacity calculation
/// goes through [`Geometry::locate`].

use crate::error::{AtrError, Result};
use crate::format::constants::*;
use crate::format::{AtrHeader, Density, ImageKind};

/// How the three 128-byte boot sectors sit in a 256-byte image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootLayout {
    /// Boot sectors are stored back to back, sector 4 starts at byte 384
    Packed,
    /// Every sector has a 256-byte slot; boot sectors use the first half
    Padded,
}

impl BootLayout {
    /// Choose the layout implied by a raw image's data size
    ///
    /// A packed double density dump is never a whole number of 256-byte
    /// sectors, so one that is must be padded. ATR images are always
    /// packed; their header fixes the layout.
    pub fn for_image(sector_size: u16, data_size: u64) -> Self {
        if sector_size == DOUBLE_SECTOR_SIZE && data_size % DOUBLE_SECTOR_SIZE as u64 == 0 {
            BootLayout::Padded
        } else {
            BootLayout::Packed
        }
    }
}

/// Byte range of one sector within the underlying file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLocation {
    /// Absolute byte offset, header included
    pub offset: u64,
    /// Sector length in bytes
    pub length: usize,
}

impl SectorLocation {
    /// Offset one past the last byte of the sector
    pub fn end(&self) -> u64 {
        self.offset + self.length as u64
    }
}

/// Layout of a loaded disk image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Container type
    pub kind: ImageKind,
    /// Bytes before sector 1
    pub header_size: u64,
    /// Bytes of sector data (file size minus header for raw images,
    /// the declared size for ATR)
    pub data_size: u64,
    /// Nominal sector size, 128 or 256
    pub sector_size: u16,
    /// Placement of the boot sectors
    pub boot_layout: BootLayout,
}

impl Geometry {
    /// Geometry declared by an ATR header
    ///
    /// `file_size` is the full length of the file; it may exceed the
    /// declared size but must not fall short of it.
    pub fn from_atr_header(header: &AtrHeader, file_size: u64) -> Result<Self> {
        if !is_valid_sector_size(header.sector_size) {
            return Err(AtrError::UnsupportedSectorSize(header.sector_size));
        }

        let data_size = header.data_size();
        if data_size == 0 {
            return Err(AtrError::invalid_format("ATR header declares no sector data"));
        }

        let available = file_size.saturating_sub(ATR_HEADER_SIZE as u64);
        if data_size > available {
            return Err(AtrError::invalid_format(format!(
                "ATR header declares {} bytes but file holds {}",
                data_size, available
            )));
        }

        Ok(Self {
            kind: ImageKind::Atr,
            header_size: ATR_HEADER_SIZE as u64,
            data_size,
            sector_size: header.sector_size,
            boot_layout: BootLayout::Packed,
        })
    }

    /// Geometry of a headerless sector dump
    ///
    /// Anything larger than the biggest all-128-byte format is taken to
    /// be double density.
    pub fn raw(file_size: u64) -> Result<Self> {
        if file_size < SINGLE_SECTOR_SIZE as u64 {
            return Err(AtrError::invalid_format(format!(
                "Raw image of {} bytes is smaller than one sector",
                file_size
            )));
        }

        let sector_size = if file_size > RAW_SINGLE_SECTOR_LIMIT {
            DOUBLE_SECTOR_SIZE
        } else {
            SINGLE_SECTOR_SIZE
        };

        Ok(Self {
            kind: ImageKind::Xfd,
            header_size: 0,
            data_size: file_size,
            sector_size,
            boot_layout: BootLayout::for_image(sector_size, file_size),
        })
    }

    /// Geometry of a freshly formatted image
    pub fn for_density(density: Density, kind: ImageKind) -> Self {
        Self {
            kind,
            header_size: kind.header_size(),
            data_size: density.total_size(),
            sector_size: density.sector_size(),
            boot_layout: BootLayout::Packed,
        }
    }

    /// Locate a sector, failing if any of it lies outside the data region
    pub fn locate(&self, sector: u16) -> Result<SectorLocation> {
        let out_of_range = || AtrError::SectorOutOfRange {
            sector,
            max: self.sector_count(),
        };

        if sector == 0 {
            return Err(out_of_range());
        }

        let index = (sector - 1) as u64;
        let single = SINGLE_SECTOR_SIZE as u64;
        let double = DOUBLE_SECTOR_SIZE as u64;

        let (relative, length) = if self.sector_size != DOUBLE_SECTOR_SIZE {
            (index * single, single)
        } else {
            let boot = sector <= BOOT_SECTOR_COUNT;
            match (self.boot_layout, boot) {
                (BootLayout::Packed, true) => (index * single, single),
                (BootLayout::Packed, false) => {
                    (BOOT_AREA_SIZE + (index - BOOT_SECTOR_COUNT as u64) * double, double)
                }
                (BootLayout::Padded, true) => (index * double, single),
                (BootLayout::Padded, false) => (index * double, double),
            }
        };

        if relative + length > self.data_size {
            return Err(out_of_range());
        }

        Ok(SectorLocation {
            offset: self.header_size + relative,
            length: length as usize,
        })
    }

    /// Length of a sector in bytes
    pub fn sector_length(&self, sector: u16) -> Result<usize> {
        self.locate(sector).map(|location| location.length)
    }

    /// Highest valid sector number
    pub fn sector_count(&self) -> u16 {
        let single = SINGLE_SECTOR_SIZE as u64;
        let double = DOUBLE_SECTOR_SIZE as u64;

        let count = if self.sector_size != DOUBLE_SECTOR_SIZE {
            self.data_size / single
        } else {
            match self.boot_layout {
                BootLayout::Packed if self.data_size < BOOT_AREA_SIZE => self.data_size / single,
                BootLayout::Packed => {
                    BOOT_SECTOR_COUNT as u64 + (self.data_size - BOOT_AREA_SIZE) / double
                }
                BootLayout::Padded => self.data_size / double,
            }
        };

        u16::try_from(count).unwrap_or(u16::MAX)
    }

    /// Total file length this geometry occupies
    pub fn file_size(&self) -> u64 {
        self.header_size + self.data_size
    }

    /// Double density: 256-byte sectors from sector 4 on
    pub fn is_double_density(&self) -> bool {
        self.sector_size == DOUBLE_SECTOR_SIZE
    }

    /// Enhanced density: 128-byte sectors at one of the 1050 sizes
    pub fn is_enhanced_density(&self) -> bool {
        self.sector_size == SINGLE_SECTOR_SIZE
            && Density::from_geometry(self.data_size, self.sector_size)
                .map(|d| d.is_enhanced())
                .unwrap_or(false)
    }

    /// Preset matching this geometry, if any
    pub fn density(&self) -> Option<Density> {
        if self.boot_layout == BootLayout::Padded {
            return None;
        }
        Density::from_geometry(self.data_size, self.sector_size)
    }
}
