//! Image loading for the analysis route.

use crate::{Error, Result, engine::ImageInput};
use image::{ImageFormat, ImageReader, RgbImage};
use std::{io::Cursor, path::Path};
use tracing::debug;

pub const DEFAULT_PROMPT: &str = "Describe this image in detail";

/// Opens the image at `path` and converts it to RGB8. The format is sniffed
/// from the file contents; the extension is only a fallback.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageInput> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::image(format!("Image not found: {}", path.display())));
    }

    let rgb = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgb8();
    debug!(
        "Decoded {} as {}x{} RGB",
        path.display(),
        rgb.width(),
        rgb.height()
    );

    encode_rgb(&rgb)
}

/// Runs [`load_image`] on the blocking pool.
pub async fn load_image_blocking(path: String) -> Result<ImageInput> {
    tokio::task::spawn_blocking(move || load_image(&path))
        .await
        .map_err(|e| Error::internal(format!("Image loading task failed: {}", e)))?
}

pub fn encode_rgb(rgb: &RgbImage) -> Result<ImageInput> {
    let mut png = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(ImageInput {
        width: rgb.width(),
        height: rgb.height(),
        png,
    })
}

/// Prepends the image marker token to the user prompt.
pub fn mark_prompt(image_token: &str, prompt: &str) -> String {
    if image_token.is_empty() {
        prompt.to_string()
    } else {
        format!("{}\n{}", image_token, prompt)
    }
}
