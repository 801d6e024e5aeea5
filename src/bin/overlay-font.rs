use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use overlay_font::{
    FontCatalog, OverlayFont, OverlayFontConfig, RandomStream,
    prep::resize::{ingest_image, pad_to_fixed_size, resize_to_shape},
};

#[derive(Parser, Debug)]
#[command(name = "overlay-font", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overlay random symbol strings onto a batch of images and write PNGs.
    Augment(AugmentArgs),
    /// List the fonts a directory would contribute, with content hashes.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct AugmentArgs {
    /// Augmenter configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output directory for augmented PNGs.
    #[arg(long)]
    out: PathBuf,

    /// Seed for the random stream.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory of source images. Without it, blank backgrounds are augmented.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Source image extensions (with --input).
    #[arg(long, num_args = 1.., default_values_t = ["jpg".to_string(), "png".to_string()])]
    ext: Vec<String>,

    /// Number of blank backgrounds (without --input).
    #[arg(long, default_value_t = 10)]
    count: usize,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Font directory to scan.
    #[arg(long)]
    dir: PathBuf,

    /// Font file extensions.
    #[arg(long, num_args = 1.., default_values_t = ["ttf".to_string(), "otf".to_string()])]
    ext: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Augment(args) => cmd_augment(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn cmd_augment(args: AugmentArgs) -> anyhow::Result<()> {
    let config = OverlayFontConfig::from_json_path(&args.config)?;
    let (h, w) = (config.target_height, config.target_width);
    let augmenter = OverlayFont::new(config)?;

    let images = match &args.input {
        Some(dir) => load_images(dir, &args.ext, h, w)?,
        None => (0..args.count).map(|_| image::GrayImage::new(w, h)).collect(),
    };
    if images.is_empty() {
        anyhow::bail!("no input images to augment");
    }

    let mut stream = RandomStream::from_seed(args.seed);
    let augmented = augmenter.augment_batch(&images, &mut stream)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    for (i, img) in augmented.iter().enumerate() {
        let path = args.out.join(format!("overlay_{i:04}.png"));
        img.save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} images to {}", augmented.len(), args.out.display());
    Ok(())
}

fn load_images(
    dir: &Path,
    exts: &[String],
    h: u32,
    w: u32,
) -> anyhow::Result<Vec<image::GrayImage>> {
    let wanted: Vec<String> = exts
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("read image directory '{}'", dir.display()))?
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| wanted.contains(&ext.to_ascii_lowercase()))
        })
        .collect();
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let decoded =
            image::open(&path).with_context(|| format!("decode image '{}'", path.display()))?;
        let gray = ingest_image(&image::DynamicImage::ImageLuma8(decoded.to_luma8()))?;
        let resized = resize_to_shape(&gray, h, w)?;
        out.push(pad_to_fixed_size(&resized, h, w)?);
    }
    Ok(out)
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let catalog = FontCatalog::discover(&args.dir, &args.ext)?;
    for (id, path) in catalog.paths().iter().enumerate() {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        println!("{id}\t{}\t{}", sha256_hex(&bytes), path.display());
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
