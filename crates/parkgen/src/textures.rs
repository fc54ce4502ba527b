//! Placeholder textures shipped with every export.
//!
//! All images are generated procedurally and deterministically: the concrete
//! noise uses a fixed seed, the sky faces are plain vertical gradients.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageResult, Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const CONCRETE_SEED: u64 = 0x5ca7_e9a4;
const CONCRETE_BASE: [f64; 3] = [128.0, 128.0, 130.0];
/// Per-pixel brightness jitter of the concrete surface.
const CONCRETE_GRAIN: f64 = 14.0;

const SKY_ZENITH: [f64; 3] = [90.0, 140.0, 230.0];
const SKY_HORIZON: [f64; 3] = [190.0, 215.0, 255.0];
const SKY_GROUND: [u8; 3] = [96, 96, 98];

/// Every texture bundled into the archive, in archive order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texture {
    Concrete,
    SkyTop,
    SkyFront,
    SkyBack,
    SkyLeft,
    SkyRight,
    SkyBottom,
}

impl Texture {
    pub const ALL: [Texture; 7] = [
        Texture::Concrete,
        Texture::SkyTop,
        Texture::SkyFront,
        Texture::SkyBack,
        Texture::SkyLeft,
        Texture::SkyRight,
        Texture::SkyBottom,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Texture::Concrete => "concrete_gray.jpg",
            Texture::SkyTop => "sky_top.jpg",
            Texture::SkyFront => "sky_front.jpg",
            Texture::SkyBack => "sky_back.jpg",
            Texture::SkyLeft => "sky_left.jpg",
            Texture::SkyRight => "sky_right.jpg",
            Texture::SkyBottom => "sky_bottom.jpg",
        }
    }

    /// Rasterize at `size × size` pixels.
    pub fn render(&self, size: u32) -> RgbImage {
        let size = size.max(1);
        match self {
            Texture::Concrete => concrete(size),
            Texture::SkyTop => RgbImage::from_pixel(size, size, to_rgb(SKY_ZENITH)),
            Texture::SkyBottom => RgbImage::from_pixel(size, size, Rgb(SKY_GROUND)),
            Texture::SkyFront | Texture::SkyBack | Texture::SkyLeft | Texture::SkyRight => {
                sky_side(size)
            }
        }
    }

    /// Rasterize and JPEG-encode.
    pub fn encode(&self, size: u32, quality: u8) -> ImageResult<Vec<u8>> {
        encode_jpeg(&self.render(size), quality)
    }
}

fn to_rgb(c: [f64; 3]) -> Rgb<u8> {
    Rgb(c.map(|v| v.round().clamp(0.0, 255.0) as u8))
}

fn concrete(size: u32) -> RgbImage {
    let mut rng = ChaCha8Rng::seed_from_u64(CONCRETE_SEED);
    RgbImage::from_fn(size, size, |_, _| {
        let grain = rng.gen_range(-CONCRETE_GRAIN..=CONCRETE_GRAIN);
        to_rgb(CONCRETE_BASE.map(|c| c + grain))
    })
}

/// Zenith colour at the top row fading to the horizon colour at the bottom.
fn sky_side(size: u32) -> RgbImage {
    let span = f64::from(size.saturating_sub(1).max(1));
    RgbImage::from_fn(size, size, |_, y| {
        let t = f64::from(y) / span;
        to_rgb(std::array::from_fn(|i| {
            SKY_ZENITH[i] + (SKY_HORIZON[i] - SKY_ZENITH[i]) * t
        }))
    })
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(image)?;
    Ok(bytes)
}

/// Encode the full texture set as `(file name, jpeg bytes)` pairs.
pub fn generate_textures(size: u32, quality: u8) -> ImageResult<Vec<(String, Vec<u8>)>> {
    Texture::ALL
        .iter()
        .map(|t| Ok((t.file_name().to_string(), t.encode(size, quality)?)))
        .collect()
}
