//! Crops fully transparent borders off PNG sprites, in place.

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

use crate::domain::{Action, BatchReport, Outcome, SkipReason};
use crate::error::AssetError;
use crate::fs::{file_name, list_files_with_extension};

/// Axis-aligned box of opaque content: `(x, y, width, height)`.
pub type BoundingBox = (u32, u32, u32, u32);

pub fn trim_directory(dir: &Path) -> Result<BatchReport, AssetError> {
    if !dir.is_dir() {
        return Err(AssetError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
        ));
    }
    println!("Scanning directory: {}", dir.display());

    let mut report = BatchReport::default();
    for path in list_files_with_extension(dir, "png")? {
        let name = file_name(&path);
        let outcome = trim_file(&path);
        match &outcome {
            Outcome::Done(_) => println!("Trimmed: {name}"),
            Outcome::Skipped(SkipReason::FullyTransparent) => {
                println!("Skipped (image is fully transparent): {name}");
            }
            Outcome::Skipped(_) => println!("Skipped (no transparency to trim): {name}"),
            Outcome::Failed(err) => {
                warn!(error = %err, "trim failed");
                println!("Error ({}) processing {name}: {err}", err.kind());
            }
        }
        report.record(&path, outcome);
    }

    println!("\n--- Processing Summary ---");
    println!("Trimmed files: {}", report.done());
    println!("Skipped files: {}", report.skipped());
    println!("Errors: {}", report.failed());
    println!("------------------------");
    Ok(report)
}

pub fn trim_file(path: &Path) -> Outcome {
    let image = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(source) => {
            return Outcome::Failed(AssetError::Image {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let (width, height) = image.dimensions();

    let Some((x, y, w, h)) = opaque_bounds(&image) else {
        return Outcome::Skipped(SkipReason::FullyTransparent);
    };
    if (w, h) == (width, height) {
        return Outcome::Skipped(SkipReason::NothingToTrim);
    }

    let cropped = image::imageops::crop_imm(&image, x, y, w, h).to_image();
    // Encoded in memory first so a failed encode never truncates the original
    let mut encoded = Cursor::new(Vec::new());
    if let Err(source) = cropped.write_to(&mut encoded, ImageFormat::Png) {
        return Outcome::Failed(AssetError::Image {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Err(e) = fs::write(path, encoded.into_inner()) {
        return Outcome::Failed(AssetError::io(path, e));
    }
    Outcome::Done(Action::Trimmed {
        from: (width, height),
        to: (w, h),
    })
}

/// Bounding box of pixels with non-zero alpha, or `None` if there are none.
pub fn opaque_bounds(image: &RgbaImage) -> Option<BoundingBox> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }
    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
