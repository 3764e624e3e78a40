/// Builder for formatting new images

use crate::error::Result;
use crate::format::{Density, ImageKind};
use crate::image::DiskImage;
use crate::io::Storage;

/// Builder for formatting new ATR and XFD images
#[derive(Debug, Clone, Copy)]
pub struct ImageBuilder {
    density: Density,
    kind: ImageKind,
}

impl ImageBuilder {
    /// Create a new builder with default values (SS/SD 40-track ATR)
    pub fn new() -> Self {
        Self {
            density: Density::SsSd40,
            kind: ImageKind::Atr,
        }
    }

    /// Set the density
    pub fn density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Set the container type
    pub fn kind(mut self, kind: ImageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Format the storage and return an image bound to it
    pub fn build<S: Storage>(self, storage: S) -> Result<DiskImage<S>> {
        let mut image = DiskImage::new();
        image.format(storage, self.density, self.kind)?;
        Ok(image)
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
