/// Lighting gradient example
/// Renders the gradient in every decay mode and a few directions


use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use image_augment::{DecayMode, LightingGradientConfig, canvas::MaskSize};
use rand::{SeedableRng, rngs::StdRng};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Load test image, or fall back to a plain page with some "text" lines
    let img_path = Path::new("data/test.png");
    let img = if img_path.exists() {
        ImageReader::open(img_path)?.decode()?
    } else {
        DynamicImage::ImageRgb8(RgbImage::from_fn(800, 600, |x, y| {
            if (y / 12) % 3 == 0 && x > 60 && x < 740 && (x / 7) % 9 != 0 {
                Rgb([40, 40, 48])
            } else {
                Rgb([236, 232, 220])
            }
        }))
    };

    let modes = [
        DecayMode::Gaussian,
        DecayMode::LinearStatic,
        DecayMode::LinearDynamic,
    ];
    let directions = [0, 45, 120, 270];

    let mut rng = StdRng::seed_from_u64(2024);

    for mode in modes {
        for direction in directions {
            let config = LightingGradientConfig::new()
                .with_mode(mode)
                .with_direction(direction)
                .with_light_position((img.width() as i32 / 2, img.height() as i32 / 3))
                .with_transparency(0.65);

            let result = config.apply_with_rng(&img, &mut rng)?;

            let filename = format!("lighting_gradient_{}_{}.png", mode, direction);
            result.save(output_dir.join(&filename))?;
            println!("✓ Generated {}", filename);
        }
    }

    // The raw attenuation mask for the default random parameters
    let mask = LightingGradientConfig::new()
        .generate_mask(MaskSize::new(img.width(), img.height())?, &mut rng);
    mask.save(output_dir.join("lighting_gradient_mask.png"))?;
    println!("✓ Generated lighting_gradient_mask.png");

    println!("\n✓ All lighting gradients applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
