/*!
# atrmanager

A Rust library for addressing the sectors of Atari 8-bit ATR and XFD disk
images, as needed by a disk drive emulator.

## Features

- Detect ATR (16-byte header) and raw XFD images
- Translate sector numbers to byte ranges, including the 128-byte boot
  sectors of double density disks
- Read, write and format images through any seekable storage
- Idiomatic Rust API with comprehensive error handling

## Quick Start

```rust,no_run
use atrmanager::{Density, DiskImage};

// Open an existing ATR file
let mut image = DiskImage::open("disk.atr")?;

// Read a sector (sectors 1-3 are always 128 bytes)
let boot = image.read_sector(1)?;
assert_eq!(boot.len(), 128);

// Write a sector
let size = image.sector_length(4)?;
image.write_sector(4, &vec![0x42; size])?;

// Create a new double density image
let blank = DiskImage::create("blank.atr", Density::SsDd40)?;
assert!(blank.is_double_density());
# Ok::<(), atrmanager::AtrError>(())
```

Any `Read + Write + Seek` type can back an image, so in-memory buffers
work too:

```rust
use atrmanager::{Density, ImageBuilder, ImageKind};
use std::io::Cursor;

let image = ImageBuilder::new()
    .density(Density::SsEd40)
    .kind(ImageKind::Xfd)
    .build(Cursor::new(Vec::new()))?;
assert_eq!(image.sector_count(), 1040);
assert!(image.is_enhanced_density());
# Ok::<(), atrmanager::AtrError>(())
```

## Modules

- `format`: ATR header, density presets and constants
- `image`: The disk image, sector geometry and sectors
- `io`: Storage capability, detection and blank image writing
- `map`: Sector usage map
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// Error types and Result alias
pub mod error;
/// ATR and XFD format definitions
pub mod format;
/// Disk image and sector geometry
pub mod image;
/// I/O operations for ATR and XFD images
pub mod io;
/// Sector map visualization
pub mod map;

// Re-export common types
pub use error::{AtrError, Result};
pub use format::{AtrHeader, Density, ImageKind, RecordingMode};
pub use image::{
    BootLayout, DiskImage, Geometry, ImageBuilder, Sector, SectorLocation, SectorStatus,
};
pub use io::Storage;
