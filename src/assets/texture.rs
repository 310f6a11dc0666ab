//! Decoded texture assets.

use image::{ImageFormat, RgbaImage, load_from_memory, load_from_memory_with_format};

/// A decoded RGBA texture as loaded from asset storage.
///
/// Besides the pixels, the texture carries its average colour which renderers
/// without texture sampling use to tint the parts it is applied to.
#[derive(Debug, Clone)]
pub struct Texture {
    name: String,
    image: RgbaImage,
    average: [f32; 4],
}

impl Texture {
    /// Decode `bytes`. The format is taken from the file extension of `name` when
    /// it is known and guessed from the data otherwise.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> image::ImageResult<Self> {
        let img = match ImageFormat::from_path(name) {
            Ok(format) => load_from_memory_with_format(bytes, format)?,
            Err(_) => load_from_memory(bytes)?,
        };
        Ok(Self::from_image(name, img.to_rgba8()))
    }

    pub fn from_image(name: &str, image: RgbaImage) -> Self {
        let average = average_colour(&image);
        Self {
            name: name.to_string(),
            image,
            average,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Mean of all pixels, each channel in `[0, 1]`.
    pub fn average_colour(&self) -> [f32; 4] {
        self.average
    }
}

fn average_colour(image: &RgbaImage) -> [f32; 4] {
    let count = image.width() as usize * image.height() as usize;
    if count == 0 {
        return [1.0; 4];
    }
    let mut sum = [0u64; 4];
    for pixel in image.pixels() {
        for (acc, channel) in sum.iter_mut().zip(pixel.0) {
            *acc += channel as u64;
        }
    }
    sum.map(|channel| channel as f32 / (count as f32 * 255.0))
}
