//! Decoding image resources into in-memory pixel buffers.
//!
//! Loading is the only suspension point of the crate. Everything downstream
//! of a [`PixelBuffer`] is synchronous pixel-loop code.

use image::RgbaImage;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::LoadError;
use crate::source::ImageSource;
use crate::svg::{MAX_SVG_DIMENSION, looks_like_svg, rasterize_svg};

// ============================================================================
// PixelBuffer
// ============================================================================

/// A decoded RGBA raster.
///
/// Immutable once captured: there is no mutable access to the pixels, so a
/// buffer can be analyzed from several places without copies.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wraps an already decoded image.
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Builds a buffer from raw RGBA bytes.
    ///
    /// Returns `None` if `data` is not exactly `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(Self::new)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// RGBA bytes in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// The RGBA value at `(x, y)`. Panics when out of bounds, like [`RgbaImage::get_pixel`].
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Loads and decodes the image behind a locator (data URI, URL or path).
#[tracing::instrument(level = "debug", skip_all)]
pub async fn load_pixel_buffer(locator: &str) -> Result<PixelBuffer, LoadError> {
    let source = ImageSource::parse(locator)?;
    load_source(&source).await
}

/// Loads and decodes an already parsed [`ImageSource`].
pub async fn load_source(source: &ImageSource) -> Result<PixelBuffer, LoadError> {
    let buffer = match source {
        ImageSource::DataUri { mime, data } => decode_with_mime(data, Some(mime.as_str()))?,
        ImageSource::Bytes(bytes) => decode_pixel_buffer(bytes)?,
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            decode_pixel_buffer(&bytes)?
        }
        ImageSource::Url(url) => {
            let bytes = fetch_bytes(url).await?;
            decode_pixel_buffer(&bytes)?
        }
    };

    debug!(
        width = buffer.width(),
        height = buffer.height(),
        remote = source.is_remote(),
        "decoded pixel buffer"
    );
    Ok(buffer)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let fetch_err = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(fetch_err)?;
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(LoadError::Access {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let response = response.error_for_status().map_err(fetch_err)?;
    let bytes = response.bytes().await.map_err(fetch_err)?;
    Ok(bytes.to_vec())
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes raster (PNG, JPEG, GIF, WebP, ...) or SVG bytes into a pixel buffer.
pub fn decode_pixel_buffer(bytes: &[u8]) -> Result<PixelBuffer, LoadError> {
    decode_with_mime(bytes, None)
}

fn decode_with_mime(bytes: &[u8], mime: Option<&str>) -> Result<PixelBuffer, LoadError> {
    let is_svg = mime.is_some_and(|m| m.starts_with("image/svg")) || looks_like_svg(bytes);

    let image = if is_svg {
        rasterize_svg(bytes, MAX_SVG_DIMENSION)?
    } else {
        image::load_from_memory(bytes)?.to_rgba8()
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(LoadError::Empty);
    }
    Ok(PixelBuffer::new(image))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use image::Rgba;

    use super::*;

    pub(crate) fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    pub(crate) fn png_data_uri(img: &RgbaImage) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(img)))
    }

    #[test]
    fn pixel_buffer_from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_none());

        let buffer = PixelBuffer::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.pixel(0, 0), [1, 2, 3, 4]);
        assert_eq!(buffer.pixel_count(), 1);
    }

    #[test]
    fn decodes_png_bytes() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let buffer = decode_pixel_buffer(&png_bytes(&img)).unwrap();
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.pixel(2, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_pixel_buffer(b"definitely not an image"),
            Err(LoadError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn loads_data_uri() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let buffer = load_pixel_buffer(&png_data_uri(&img)).await.unwrap();
        assert_eq!(buffer.dimensions(), (4, 4));
    }

    #[tokio::test]
    async fn loads_svg_data_uri() {
        let uri = "data:image/svg+xml;utf8,%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%20width%3D%228%22%20height%3D%224%22%2F%3E";
        let buffer = load_pixel_buffer(uri).await.unwrap();
        assert_eq!(buffer.dimensions(), (8, 4));
    }

    #[tokio::test]
    async fn loads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let img = RgbaImage::from_pixel(5, 7, Rgba([255, 255, 255, 0]));
        std::fs::write(&path, png_bytes(&img)).unwrap();

        let buffer = load_pixel_buffer(path.to_str().unwrap()).await.unwrap();
        assert_eq!(buffer.dimensions(), (5, 7));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = load_pixel_buffer(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
