//! Image locators: data URIs, remote URLs, local paths and raw bytes.

use std::path::PathBuf;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;

use crate::error::LoadError;

/// Where an image comes from.
///
/// Data URIs are decoded eagerly at parse time, so a malformed payload is
/// reported before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// An embedded `data:` URI, already decoded.
    DataUri { mime: String, data: Vec<u8> },

    /// An `http://` or `https://` URL.
    Url(String),

    /// A local file (`file://` URL or bare path).
    Path(PathBuf),

    /// Bytes the caller already holds.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Parses an image locator string.
    pub fn parse(locator: &str) -> Result<Self, LoadError> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(LoadError::InvalidSource("empty locator".into()));
        }

        if let Some(rest) = strip_prefix_ignore_case(locator, "data:") {
            return parse_data_uri(rest);
        }
        if starts_with_ignore_case(locator, "http://") || starts_with_ignore_case(locator, "https://")
        {
            return Ok(Self::Url(locator.to_string()));
        }
        if let Some(path) = strip_prefix_ignore_case(locator, "file://") {
            let path = percent_decode_str(path).decode_utf8_lossy();
            return Ok(Self::Path(PathBuf::from(path.as_ref())));
        }
        if let Some((scheme, _)) = locator.split_once("://") {
            return Err(LoadError::InvalidSource(format!("unsupported scheme `{scheme}`")));
        }

        Ok(Self::Path(PathBuf::from(locator)))
    }

    /// The declared MIME type, when the source carries one.
    pub fn mime(&self) -> Option<&str> {
        match self {
            Self::DataUri { mime, .. } => Some(mime),
            _ => None,
        }
    }

    /// Returns `true` for sources that need network access.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl FromStr for ImageSource {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// `data:[<mime>][;param...][;base64],<payload>`
fn parse_data_uri(rest: &str) -> Result<ImageSource, LoadError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::DataUri("missing `,` separator".into()))?;

    let mut params = meta.split(';');
    let mime = match params.next().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => "text/plain".to_string(),
    };
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| LoadError::DataUri(e.to_string()))?
    } else {
        percent_decode_str(payload).collect()
    };

    if data.is_empty() {
        return Err(LoadError::DataUri("empty payload".into()));
    }

    Ok(ImageSource::DataUri { mime, data })
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    starts_with_ignore_case(s, prefix).then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base64_data_uri() {
        let source = ImageSource::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(
            source,
            ImageSource::DataUri {
                mime: "image/png".into(),
                data: b"hello".to_vec(),
            }
        );
        assert_eq!(source.mime(), Some("image/png"));
    }

    #[test]
    fn parses_percent_encoded_svg_data_uri() {
        let source =
            ImageSource::parse("data:image/svg+xml;utf8,%3Csvg%20width%3D%221%22%2F%3E").unwrap();
        let ImageSource::DataUri { mime, data } = source else {
            panic!("expected data URI");
        };
        assert_eq!(mime, "image/svg+xml");
        assert_eq!(data, br#"<svg width="1"/>"#.to_vec());
    }

    #[test]
    fn rejects_malformed_data_uris() {
        assert!(matches!(
            ImageSource::parse("data:image/png;base64"),
            Err(LoadError::DataUri(_))
        ));
        assert!(matches!(
            ImageSource::parse("data:image/png;base64,!!!"),
            Err(LoadError::DataUri(_))
        ));
        assert!(matches!(
            ImageSource::parse("data:image/png;base64,"),
            Err(LoadError::DataUri(_))
        ));
    }

    #[test]
    fn classifies_urls_and_paths() {
        assert!(ImageSource::parse("https://cdn.example.com/a.png").unwrap().is_remote());
        assert!(ImageSource::parse("HTTP://cdn.example.com/a.png").unwrap().is_remote());
        assert_eq!(
            ImageSource::parse("file:///tmp/logo%20v2.png").unwrap(),
            ImageSource::Path(PathBuf::from("/tmp/logo v2.png"))
        );
        assert_eq!(
            ImageSource::parse("assets/logo.png").unwrap(),
            ImageSource::Path(PathBuf::from("assets/logo.png"))
        );
    }

    #[test]
    fn rejects_unknown_schemes_and_empty_input() {
        assert!(matches!(
            ImageSource::parse("ftp://example.com/a.png"),
            Err(LoadError::InvalidSource(_))
        ));
        assert!(matches!(ImageSource::parse("   "), Err(LoadError::InvalidSource(_))));
    }
}
