use clap::{ArgGroup, Parser};
use std::error::Error;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

use acne_scan::{DetectorConfig, detect};

#[derive(Parser, Debug)]
#[command(
    name = "acne",
    about = "Detect acne lesions in skin photos; writes annotated images, stage masks, and JSON reports",
    version,
    group(
        ArgGroup::new("action")
            .required(true)
            .multiple(true)
            .args(["annotate", "masks", "json"])
    )
)]
struct Cli {
    /// Directory containing input images
    #[arg(short = 'd', long = "dir")]
    dir: PathBuf,

    /// Directory for generated files
    #[arg(short = 'o', long = "out", default_value = "output")]
    out: PathBuf,

    /// Write annotated PNGs
    #[arg(long = "annotate", short = 'a')]
    annotate: bool,

    /// Write skin and candidate mask PNGs
    #[arg(long = "masks", short = 'm')]
    masks: bool,

    /// Write JSON detection reports
    #[arg(long = "json", short = 'j')]
    json: bool,

    /// Log pipeline stage details
    #[arg(long = "verbose", short = 'v')]
    verbose: bool,
}

fn is_image_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "bmp" | "gif" | "tif" | "tiff" | "webp"
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if !cli.dir.is_dir() {
        return Err(format!("Not a directory: {}", cli.dir.display()).into());
    }

    let mut images: Vec<PathBuf> = fs::read_dir(&cli.dir)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image_file(p))
        .collect();

    images.sort();

    if images.is_empty() {
        eprintln!("No images found in {}", cli.dir.display());
        return Ok(());
    }

    fs::create_dir_all(&cli.out)?;

    let config = DetectorConfig::default();

    for image_path in &images {
        let stem = image_path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("image");

        let img = match image::open(image_path) {
            Ok(v) => v.to_rgb8(),
            Err(e) => {
                eprintln!("Failed to open {}: {e}", image_path.display());
                continue;
            }
        };

        let detection = match detect(&img, &config) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Detection failed for {}: {e}", image_path.display());
                continue;
            }
        };

        println!(
            "{}: {} lesions",
            image_path.display(),
            detection.lesions.len()
        );

        if cli.annotate {
            let out = cli.out.join(format!("{stem}_annotated.png"));
            if let Err(e) = detection.annotated.save(&out) {
                eprintln!(
                    "Failed to save {} for {}: {e}",
                    out.display(),
                    image_path.display()
                );
            }
        }

        if cli.masks {
            let out_skin = cli.out.join(format!("{stem}_skin.png"));
            if let Err(e) = detection.skin_mask.save(&out_skin) {
                eprintln!(
                    "Failed to save {} for {}: {e}",
                    out_skin.display(),
                    image_path.display()
                );
            }
            let out_candidates = cli.out.join(format!("{stem}_candidates.png"));
            if let Err(e) = detection.candidate_mask.save(&out_candidates) {
                eprintln!(
                    "Failed to save {} for {}: {e}",
                    out_candidates.display(),
                    image_path.display()
                );
            }
        }

        if cli.json {
            let out = cli.out.join(format!("{stem}_lesions.json"));
            match serde_json::to_string_pretty(&detection.summary()) {
                Ok(s) => {
                    if let Err(e) = fs::write(&out, s) {
                        eprintln!(
                            "Failed to write {} for {}: {e}",
                            out.display(),
                            image_path.display()
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Failed to serialize report for {}: {e}", image_path.display());
                }
            }
        }
    }

    Ok(())
}
