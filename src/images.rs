use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::path::{Path, PathBuf};

use crate::ScanError;

/// Where the photo to analyse comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image file on disk
    Path(PathBuf),
    /// Base64 data, optionally as a `data:image/...;base64,` URL
    Base64(String),
    /// Raw image bytes
    Bytes(Vec<u8>),
}

/// An image ready to be embedded in a provider request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base64 payload without any data-URL prefix
    pub data: String,
    /// MIME type such as `image/jpeg`
    pub media_type: String,
}

impl EncodedImage {
    /// `data:<media type>;base64,<data>`, the form OpenAI-style APIs accept.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

impl ImageSource {
    /// Read (if needed) and base64-encode the image.
    ///
    /// # Errors
    /// Returns [`ScanError::ImageError`] if the file cannot be read.
    pub async fn encode(&self) -> Result<EncodedImage, ScanError> {
        let encoded = match self {
            ImageSource::Path(path) => {
                let bytes = tokio::fs::read(path).await?;
                EncodedImage {
                    data: STANDARD.encode(&bytes),
                    media_type: media_type_for_path(path).to_string(),
                }
            }
            ImageSource::Base64(data) => split_data_url(data),
            ImageSource::Bytes(bytes) => EncodedImage {
                data: STANDARD.encode(bytes),
                media_type: "image/jpeg".to_string(),
            },
        };

        debug!(
            "Encoded {} image: {} base64 characters",
            encoded.media_type,
            encoded.data.len()
        );

        Ok(encoded)
    }
}

fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn split_data_url(data: &str) -> EncodedImage {
    let data = data.trim();

    if let Some((header, payload)) = data
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
    {
        return EncodedImage {
            data: payload.to_string(),
            media_type: header.to_string(),
        };
    }

    EncodedImage {
        data: data.to_string(),
        media_type: "image/jpeg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("fridge.PNG")), "image/png");
        assert_eq!(media_type_for_path(Path::new("fridge.webp")), "image/webp");
        assert_eq!(media_type_for_path(Path::new("fridge.jpg")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("fridge")), "image/jpeg");
    }

    #[test]
    fn test_split_data_url() {
        let image = split_data_url("data:image/png;base64,aGVsbG8=");
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");

        let image = split_data_url("aGVsbG8=");
        assert_eq!(image.media_type, "image/jpeg");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn test_data_url_round_trip() {
        let image = EncodedImage {
            data: "aGVsbG8=".to_string(),
            media_type: "image/png".to_string(),
        };
        assert_eq!(split_data_url(&image.data_url()), image);
    }

    #[tokio::test]
    async fn test_encode_bytes() {
        let image = ImageSource::Bytes(b"test data".to_vec()).encode().await.unwrap();
        assert_eq!(image.data, STANDARD.encode(b"test data"));
        assert_eq!(image.media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_encode_missing_file() {
        let result = ImageSource::Path(PathBuf::from("/definitely/not/here.jpg"))
            .encode()
            .await;
        assert!(matches!(result, Err(ScanError::ImageError(_))));
    }
}
