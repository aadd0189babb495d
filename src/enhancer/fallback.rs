// Classical in-process enhancement used when the external tool is absent

use image::{DynamicImage, imageops::FilterType};

use super::SCALE_FACTOR;

/// Sharpening kernel applied after upscaling: center 9, neighbors -1.
const SHARPEN_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0];

/// Upscales the image to exactly 4x its dimensions with cubic interpolation,
/// then sharpens with a fixed 3x3 convolution. Pure and infallible; the scale
/// matches the external tool's advertised factor so both strategies produce
/// the same output dimensions.
///
/// The transform operates on color channels only: any alpha channel is
/// dropped up front so it never runs through the sharpen kernel.
pub(super) fn fallback_enhance(image: &DynamicImage) -> DynamicImage {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let upscaled = rgb.resize_exact(
        rgb.width() * SCALE_FACTOR,
        rgb.height() * SCALE_FACTOR,
        FilterType::CatmullRom,
    );

    upscaled.filter3x3(&SHARPEN_KERNEL)
}
