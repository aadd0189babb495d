// enhance-server: HTTP image enhancement service.
// Upscales uploaded images with an external RealESRGAN binary when one is
// installed, or with an in-process bicubic upscale + sharpen otherwise.

pub mod enhancer;
pub mod web;
