pub mod annotation;
pub mod canvas;
pub mod colour_space;
pub mod decay;
pub mod finisher;
pub mod lighting_gradient;
pub mod transform;

pub use annotation::{Annotations, AugmentOutput, BoundingBox, Keypoint};
pub use decay::DecayMode;
pub use lighting_gradient::{LightingGradientConfig, ResolvedLighting};

use image::DynamicImage;
use rand::Rng;

pub type ImageAugmentResult<T> = Result<T, ImageAugmentError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageAugmentError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// An image augmentation that may draw from a random source.
///
/// Implementations resolve all of their random parameters from `rng`
/// before touching pixel data, so the same seed reproduces the same output.
pub trait Augmentation {
    fn augment<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        rng: &mut R,
    ) -> ImageAugmentResult<DynamicImage>;

    /// Probability in `[0, 1]` that the pipeline runs this augmentation.
    fn probability(&self) -> f32 {
        1.0
    }

    fn should_run<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random::<f32>() < self.probability()
    }

    /// Applies the augmentation when `force` is set or the probability gate
    /// fires, otherwise hands back an unchanged copy of `image`.
    fn run<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        force: bool,
        rng: &mut R,
    ) -> ImageAugmentResult<DynamicImage> {
        if force || self.should_run(rng) {
            self.augment(image, rng)
        } else {
            log::trace!("augmentation skipped by probability gate");
            Ok(image.clone())
        }
    }

    /// Like [`Augmentation::run`], carrying annotations through untouched.
    fn run_with_annotations<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        annotations: Annotations,
        force: bool,
        rng: &mut R,
    ) -> ImageAugmentResult<AugmentOutput> {
        let image = self.run(image, force, rng)?;
        Ok(AugmentOutput::new(image, annotations))
    }
}
