mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::LightingFile;
use image::ImageReader;
use image_augment::canvas::MaskSize;
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;

/// Apply a directional lighting gradient to an image.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input image
    #[arg(short, long)]
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// TOML file with lighting parameters, overridden by the flags below
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Light anchor as `X,Y`
    #[arg(long, value_parser = parse_position)]
    position: Option<(i32, i32)>,

    /// Rotation of the light strip in degrees
    #[arg(long)]
    direction: Option<i32>,

    #[arg(long)]
    max_brightness: Option<i32>,

    #[arg(long)]
    min_brightness: Option<i32>,

    /// gaussian, linear_static or linear_dynamic
    #[arg(long)]
    mode: Option<String>,

    #[arg(long)]
    decay_rate: Option<f32>,

    #[arg(long)]
    transparency: Option<f32>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the attenuation mask
    #[arg(long)]
    mask_output: Option<PathBuf>,
}

impl Args {
    fn lighting(&self) -> LightingFile {
        LightingFile {
            light_position: self.position,
            direction: self.direction,
            max_brightness: self.max_brightness,
            min_brightness: self.min_brightness,
            mode: self.mode.clone(),
            linear_decay_rate: self.decay_rate,
            transparency: self.transparency,
            seed: self.seed,
        }
    }
}

fn parse_position(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;

    let x = x.trim().parse().map_err(|e| format!("invalid x `{x}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("invalid y `{y}`: {e}"))?;
    Ok((x, y))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let lighting = match &args.config {
        Some(path) => LightingFile::load(path)?.merge(args.lighting()),
        None => args.lighting(),
    };
    let config = lighting.to_config();
    log::info!("{config}");

    let image = ImageReader::open(&args.input)
        .with_context(|| format!("open {} failed", args.input.display()))?
        .decode()
        .with_context(|| format!("decode {} failed", args.input.display()))?;

    let mut rng = match lighting.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let size = MaskSize::new(image.width(), image.height())?;
    let resolved = config.resolve(size, &mut rng);
    let mask = resolved.generate_mask();
    let output = resolved.composite(&image, &mask)?;

    output
        .save(&args.output)
        .with_context(|| format!("save {} failed", args.output.display()))?;
    log::info!("saved {}", args.output.display());

    if let Some(path) = &args.mask_output {
        mask.save(path)
            .with_context(|| format!("save {} failed", path.display()))?;
        log::info!("saved mask {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("10,20"), Ok((10, 20)));
        assert_eq!(parse_position(" -3 , 7"), Ok((-3, 7)));
        assert!(parse_position("10").is_err());
        assert!(parse_position("a,1").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "augment-helper",
            "-i",
            "in.png",
            "-o",
            "out.png",
            "--position",
            "5,6",
            "--mode",
            "linear_static",
        ]);

        let lighting = args.lighting();
        assert_eq!(lighting.light_position, Some((5, 6)));
        assert_eq!(lighting.mode.as_deref(), Some("linear_static"));
        assert_eq!(lighting.seed, None);
    }
}
