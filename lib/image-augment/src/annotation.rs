//! Per-image annotations that travel alongside an augmented image.
//!
//! The lighting gradient only changes brightness, so none of these need to
//! be remapped; they are moved from input to output as-is.

use image::{DynamicImage, GrayImage};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis aligned box in pixel coordinates, `(x_min, y_min)` inclusive and
/// `(x_max, y_max)` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Annotations {
    pub mask: Option<GrayImage>,
    pub keypoints: Option<Vec<Keypoint>>,
    pub bounding_boxes: Option<Vec<BoundingBox>>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.mask.is_none() && self.keypoints.is_none() && self.bounding_boxes.is_none()
    }
}

/// Result of an augmentation run, in `(image, mask, keypoints, bounding_boxes)` order.
#[derive(Debug, Clone)]
pub struct AugmentOutput {
    pub image: DynamicImage,
    pub mask: Option<GrayImage>,
    pub keypoints: Option<Vec<Keypoint>>,
    pub bounding_boxes: Option<Vec<BoundingBox>>,
}

impl AugmentOutput {
    pub fn new(image: DynamicImage, annotations: Annotations) -> Self {
        let Annotations {
            mask,
            keypoints,
            bounding_boxes,
        } = annotations;

        Self {
            image,
            mask,
            keypoints,
            bounding_boxes,
        }
    }

    pub fn has_annotations(&self) -> bool {
        self.mask.is_some() || self.keypoints.is_some() || self.bounding_boxes.is_some()
    }

    pub fn into_parts(
        self,
    ) -> (
        DynamicImage,
        Option<GrayImage>,
        Option<Vec<Keypoint>>,
        Option<Vec<BoundingBox>>,
    ) {
        (self.image, self.mask, self.keypoints, self.bounding_boxes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_annotations() {
        assert!(Annotations::default().is_empty());

        let output = AugmentOutput::new(DynamicImage::new_rgb8(2, 2), Annotations::default());
        assert!(!output.has_annotations());
    }

    #[test]
    fn test_output_keeps_order() {
        let annotations = Annotations {
            mask: Some(GrayImage::new(2, 2)),
            keypoints: Some(vec![Keypoint::new(1.0, 1.5)]),
            bounding_boxes: Some(vec![BoundingBox::new(0, 0, 2, 2)]),
        };

        let (image, mask, keypoints, boxes) =
            AugmentOutput::new(DynamicImage::new_rgb8(2, 2), annotations).into_parts();

        assert_eq!(image.width(), 2);
        assert_eq!(mask.map(|m| m.dimensions()), Some((2, 2)));
        assert_eq!(keypoints, Some(vec![Keypoint::new(1.0, 1.5)]));
        assert_eq!(boxes, Some(vec![BoundingBox::new(0, 0, 2, 2)]));
    }
}
