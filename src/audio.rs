//! Down-mixes multi-channel OGG Vorbis clips to mono.
//!
//! Only the top level of the input directory is scanned. Mono inputs are
//! left alone and produce no output; everything else is written, re-encoded,
//! under the same file name in the output directory. Originals are never
//! touched.

use std::fs::{self, File};
use std::io::BufReader;
use std::num::{NonZeroU32, NonZeroU8};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use vorbis_rs::{VorbisDecoder, VorbisEncoderBuilder};

use crate::domain::{Action, BatchReport, Outcome, SkipReason};
use crate::error::AssetError;
use crate::fs::{file_name, list_files_with_extension, prepare_output_dir};

pub const OUTPUT_SUBDIR: &str = "mono_output";

pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join(OUTPUT_SUBDIR)
}

pub fn convert_directory(input_dir: &Path, output_dir: &Path) -> Result<BatchReport, AssetError> {
    if !input_dir.is_dir() {
        return Err(AssetError::io(
            input_dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input directory not found"),
        ));
    }
    prepare_output_dir(output_dir)?;

    println!("Input directory: {}", input_dir.display());
    println!("Output directory: {}", output_dir.display());
    println!("{}", "-".repeat(30));

    let mut report = BatchReport::default();
    for path in list_files_with_extension(input_dir, "ogg")? {
        println!("Processing: {}...", file_name(&path));
        let output_path = output_dir.join(path.file_name().unwrap_or_default());
        let outcome = convert_file(&path, &output_path);
        match &outcome {
            Outcome::Done(Action::Converted { channels }) => {
                println!(
                    "  Converted to mono ({channels} -> 1 channels): {}",
                    file_name(&output_path)
                );
            }
            Outcome::Skipped(_) => println!("  Already mono. Skipping."),
            Outcome::Failed(err @ AssetError::Decode { .. }) => {
                warn!(error = %err, "decode failed");
                println!("  ERROR: Could not decode file, skipping: {err}");
            }
            Outcome::Failed(err) => {
                warn!(error = %err, "conversion failed");
                println!("  ERROR ({}): {err}", err.kind());
            }
            Outcome::Done(_) => {}
        }
        report.record(&path, outcome);
    }

    print_summary(&report, output_dir);
    Ok(report)
}

/// Converts one clip, classifying the result.
pub fn convert_file(path: &Path, output_path: &Path) -> Outcome {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Outcome::Failed(AssetError::io(path, e)),
    };
    let mut decoder = match VorbisDecoder::new(BufReader::new(file)) {
        Ok(decoder) => decoder,
        Err(source) => {
            return Outcome::Failed(AssetError::Decode {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let channels = decoder.channels().get();
    if channels == 1 {
        return Outcome::Skipped(SkipReason::AlreadyMono);
    }
    debug!(path = %path.display(), channels, "down-mixing");

    let sampling_frequency = decoder.sampling_frequency();
    let mut mono = Vec::new();
    loop {
        match decoder.decode_audio_block() {
            Ok(Some(block)) => downmix_into(block.samples(), &mut mono),
            Ok(None) => break,
            Err(source) => {
                return Outcome::Failed(AssetError::Decode {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    let encoded = match encode_mono(&mono, sampling_frequency) {
        Ok(encoded) => encoded,
        Err(source) => {
            return Outcome::Failed(AssetError::Encode {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    // Written in one go so a failed encode leaves nothing behind
    if let Err(e) = fs::write(output_path, encoded) {
        return Outcome::Failed(AssetError::io(output_path, e));
    }
    Outcome::Done(Action::Converted { channels })
}

/// Appends the per-frame mean of all planar channels to `mono`.
fn downmix_into(planes: &[&[f32]], mono: &mut Vec<f32>) {
    let Some(frames) = planes.iter().map(|plane| plane.len()).min() else {
        return;
    };
    let scale = 1.0 / planes.len() as f32;
    mono.extend((0..frames).map(|i| planes.iter().map(|plane| plane[i]).sum::<f32>() * scale));
}

fn encode_mono(
    samples: &[f32],
    sampling_frequency: NonZeroU32,
) -> Result<Vec<u8>, vorbis_rs::VorbisError> {
    let mut sink = Vec::new();
    let mut encoder =
        VorbisEncoderBuilder::new(sampling_frequency, NonZeroU8::MIN, &mut sink)?.build()?;
    // Bounded blocks keep libvorbis analysis buffers small
    for chunk in samples.chunks(4096) {
        encoder.encode_audio_block([chunk])?;
    }
    encoder.finish()?;
    Ok(sink)
}

fn print_summary(report: &BatchReport, output_dir: &Path) {
    let converted = report.done();
    let skipped = report.skipped_for(SkipReason::AlreadyMono);
    let errors = report.failed();

    println!("{}", "-".repeat(30));
    println!("Batch conversion finished.");
    println!("Total files processed: {}", report.processed());
    println!("Files converted:     {converted}");
    println!("Files skipped (already mono): {skipped}");
    println!("Files with errors:   {errors}");
    if errors > 0 {
        println!("\nWARNING: Some files encountered errors. Please check the log above.");
    }
    if converted > 0 || skipped > 0 {
        println!("\nMono files are in: {}", output_dir.display());
    }
}
