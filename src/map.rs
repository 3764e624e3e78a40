/// Sector map visualization

use crate::error::Result;
use crate::image::{DiskImage, SectorStatus};
use crate::io::Storage;

/// ANSI color codes for sector map
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
    pub const DARK_WHITE: &str = "\x1b[37m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
}

/// Sectors per track assumed for images that match no preset
const DEFAULT_SECTORS_PER_TRACK: u16 = 18;

/// Classify every sector on the image, in sector order
pub fn sector_statuses<S: Storage>(image: &mut DiskImage<S>) -> Result<Vec<SectorStatus>> {
    let count = image.sector_count();
    let mut statuses = Vec::with_capacity(count as usize);

    for sector in 1..=count {
        statuses.push(image.read_sector(sector)?.status());
    }

    Ok(statuses)
}

/// Draw a visual sector map, one column per track
pub fn draw_sector_map<S: Storage>(image: &mut DiskImage<S>) -> Result<()> {
    let statuses = sector_statuses(image)?;
    if statuses.is_empty() {
        println!("No sectors found.");
        return Ok(());
    }

    let sectors_per_track = image
        .density()
        .map(|d| d.sectors_per_track())
        .unwrap_or(DEFAULT_SECTORS_PER_TRACK) as usize;
    let num_tracks = statuses.len().div_ceil(sectors_per_track);

    const BLOCK_NO_DATA: &str = "\u{2591}"; // ░ - Light shade (empty)
    const BLOCK_HAS_DATA: &str = "\u{2593}"; // ▓ - Dark shade (in-use)

    println!("=== Sector Map ===");
    println!(
        "Legend: {}In Use{} {}Filler{} {}Blank{}",
        colors::BRIGHT_WHITE,
        colors::RESET,
        colors::BRIGHT_YELLOW,
        colors::RESET,
        colors::DARK_WHITE,
        colors::RESET
    );
    println!();

    // Rows are positions within a track, first sector at the bottom
    for position in (0..sectors_per_track).rev() {
        print!("{:>2} ", position + 1);

        for track in 0..num_tracks {
            match statuses.get(track * sectors_per_track + position) {
                Some(SectorStatus::InUse) => {
                    print!("{}{}{}", colors::BRIGHT_WHITE, BLOCK_HAS_DATA, colors::RESET)
                }
                Some(SectorStatus::Filler) => {
                    print!("{}{}{}", colors::BRIGHT_YELLOW, BLOCK_HAS_DATA, colors::RESET)
                }
                Some(SectorStatus::Blank) => {
                    print!("{}{}{}", colors::DARK_WHITE, BLOCK_NO_DATA, colors::RESET)
                }
                None => print!(" "),
            }
        }
        println!();
    }

    // Track number axis, labelled every five tracks
    print!("   ");
    let mut printed_cols = vec![false; num_tracks];

    for track in 0..num_tracks {
        if track % 5 == 0 && !printed_cols[track] {
            for (i, digit) in track.to_string().chars().enumerate() {
                let col = track + i;
                if col < num_tracks {
                    print!("{}", digit);
                    printed_cols[col] = true;
                }
            }
        } else if !printed_cols[track] {
            print!(" ");
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Density;
    use crate::image::ImageBuilder;
    use std::io::Cursor;

    #[test]
    fn test_sector_statuses() {
        let mut image = ImageBuilder::new()
            .density(Density::SsSd35)
            .build(Cursor::new(Vec::new()))
            .unwrap();

        let mut data = vec![0u8; 128];
        data[0] = 0x01;
        image.write_sector(1, &data).unwrap();
        image.write_sector(2, &[0xE5; 128]).unwrap();

        let statuses = sector_statuses(&mut image).unwrap();
        assert_eq!(statuses.len(), 630);
        assert_eq!(statuses[0], SectorStatus::InUse);
        assert_eq!(statuses[1], SectorStatus::Filler);
        assert!(statuses[2..].iter().all(|&s| s == SectorStatus::Blank));
    }
}
