use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("Not a data URI")]
    MissingScheme,

    #[error("Data URI is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A self contained `data:<media type>;base64,<payload>` string, usable
/// directly as an image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    uri: String,
    // index of the ',' separating header and payload
    split: usize,
}

impl DataUri {
    pub fn encode(media_type: &str, data: &[u8]) -> Self {
        let header = format!("data:{media_type};base64");
        let split = header.len();
        let mut uri = header;
        uri.push(',');
        STANDARD.encode_string(data, &mut uri);
        Self { uri, split }
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn media_type(&self) -> &str {
        self.uri["data:".len()..self.split]
            .trim_end_matches(";base64")
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        Ok(STANDARD.decode(&self.uri[self.split + 1..])?)
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let comma = rest.find(',').ok_or(DataUriError::MissingScheme)?;
        if !rest[..comma].ends_with(";base64") {
            return Err(DataUriError::NotBase64);
        }
        let uri = Self {
            uri: s.to_string(),
            split: "data:".len() + comma,
        };
        uri.decode()?;
        Ok(uri)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn encodes_media_type_and_payload() {
        let uri = DataUri::encode("image/webp", b"hello");
        expect![[r#"data:image/webp;base64,aGVsbG8="#]].assert_eq(uri.as_str());
        assert_eq!(uri.media_type(), "image/webp");
        assert_eq!(uri.decode().unwrap(), b"hello");
    }

    #[test]
    fn binary_payload_survives() {
        let body: Vec<u8> = (0..=255).collect();
        let uri = DataUri::encode("image/png", &body);
        assert_eq!(uri.decode().unwrap(), body);
    }

    #[test]
    fn parses_foreign_uri() {
        let uri: DataUri = "data:image/png;base64,aGVsbG8=".parse().unwrap();
        assert_eq!(uri.media_type(), "image/png");
        assert_eq!(uri.decode().unwrap(), b"hello");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            "https://example.com/x.png".parse::<DataUri>(),
            Err(DataUriError::MissingScheme)
        );
        assert_eq!(
            "data:text/plain,hello".parse::<DataUri>(),
            Err(DataUriError::NotBase64)
        );
        assert!(matches!(
            "data:image/png;base64,!!!".parse::<DataUri>(),
            Err(DataUriError::Decode(_))
        ));
    }
}
