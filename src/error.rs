//! Error types for image loading and sticker compositing.
//!
//! Only resource failures are errors. Malformed colours and empty rasters
//! are handled with documented defaults by the functions that receive them.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an image locator into a [`PixelBuffer`](crate::PixelBuffer).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported image source: {0}")]
    InvalidSource(String),

    #[error("malformed data URI: {0}")]
    DataUri(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The resource exists but its pixels may not be read (HTTP 401/403).
    #[error("pixel access blocked for {url} (HTTP {status})")]
    Access { url: String, status: u16 },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to rasterize SVG: {0}")]
    Svg(String),

    #[error("image has no pixels")]
    Empty,
}

/// Failure inside the sticker pipeline.
///
/// Never surfaces through [`create_sticker_effect`](crate::create_sticker_effect),
/// which degrades to returning its input instead.
#[derive(Debug, Error)]
pub enum StickerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to encode sticker: {0}")]
    Encode(#[from] image::ImageError),

    #[error("sticker raster is empty")]
    EmptyRaster,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_resource() {
        let err = LoadError::Access {
            url: "https://cdn.example.com/logo.png".into(),
            status: 403,
        };
        assert_eq!(
            err.to_string(),
            "pixel access blocked for https://cdn.example.com/logo.png (HTTP 403)"
        );

        let err = LoadError::Io {
            path: PathBuf::from("/tmp/missing.png"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to read /tmp/missing.png"));
    }

    #[test]
    fn sticker_error_is_transparent_over_load_errors() {
        let err = StickerError::from(LoadError::Empty);
        assert_eq!(err.to_string(), "image has no pixels");
    }
}
