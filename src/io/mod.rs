/// I/O operations for ATR and XFD images

/// Detection and loading
pub mod reader;
/// Byte-addressable storage capability
pub mod storage;
/// Blank image writer
pub mod writer;

pub use reader::{probe, probe_as};
pub use storage::Storage;
pub use writer::write_blank;

use crate::error::Result;
use crate::format::{is_xfd_file, Density, ImageKind};
use crate::image::DiskImage;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open an image file for reading and writing
///
/// `.xfd` files are always treated as raw dumps; anything else is detected
/// from its contents.
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<DiskImage<File>> {
    let file = OpenOptions::new().read(true).write(true).open(&path)?;

    let mut image = DiskImage::new();
    if is_xfd_file(&path) {
        image.set_file_as(file, ImageKind::Xfd)?;
    } else {
        image.set_file(file)?;
    }
    Ok(image)
}

/// Create (or truncate) an image file and format it
///
/// `.xfd` files are written raw, anything else gets an ATR header.
pub fn create_image<P: AsRef<Path>>(path: P, density: Density) -> Result<DiskImage<File>> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;

    let mut image = DiskImage::new();
    image.format(file, density, ImageKind::for_path(&path))?;
    Ok(image)
}
