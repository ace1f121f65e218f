use bytes::Bytes;
use log::debug;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
    multipart::{Form, Part},
};

use crate::image_model::{GenerationError, Image, SketchRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.stability.ai";
pub const SKETCH_PATH: &str = "/v2beta/stable-image/control/sketch";

pub const CONTROL_STRENGTH: &str = "0.6";
pub const OUTPUT_FORMAT: &str = "webp";
pub const SKETCH_FILE_NAME: &str = "sketch.png";
pub const SKETCH_MEDIA_TYPE: &str = "image/png";

/// The multipart body of a sketch request before it is encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchPayload {
    pub prompt: &'static str,
    pub control_strength: &'static str,
    pub output_format: &'static str,
    pub image: Option<Bytes>,
}

impl SketchPayload {
    /// Loads the reference image, if there is one
    pub async fn build(request: &SketchRequest) -> Result<Self, GenerationError> {
        let image = match &request.sketch {
            Some(sketch) => Some(sketch.load().await?),
            None => None,
        };
        Ok(Self {
            prompt: request.category.prompt(),
            control_strength: CONTROL_STRENGTH,
            output_format: OUTPUT_FORMAT,
            image,
        })
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec!["prompt", "control_strength", "output_format"];
        if self.image.is_some() {
            names.push("image");
        }
        names
    }

    pub fn into_form(self) -> Result<Form, GenerationError> {
        let form = Form::new()
            .text("prompt", self.prompt)
            .text("control_strength", self.control_strength)
            .text("output_format", self.output_format);

        Ok(match self.image {
            Some(data) => form.part(
                "image",
                Part::bytes(data.to_vec())
                    .file_name(SKETCH_FILE_NAME)
                    .mime_str(SKETCH_MEDIA_TYPE)?,
            ),
            None => form,
        })
    }
}

/// Sends one sketch request and returns the image from the response body
pub async fn query(
    payload: SketchPayload,
    base_url: &str,
    api_key: &str,
    client: &Client,
) -> Result<Image, GenerationError> {
    let url = format!("{}{SKETCH_PATH}", base_url.trim_end_matches('/'));
    debug!("Sending sketch request to {url}: {:?}", payload.field_names());

    let resp = client
        .post(&url)
        .bearer_auth(api_key)
        .header(ACCEPT, "image/*")
        .multipart(payload.into_form()?)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await?;
        debug!("Sketch request rejected with {status}");
        return Err(GenerationError::Service {
            status: status.as_u16(),
            body,
        });
    }

    let media_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("image/{OUTPUT_FORMAT}"));
    let data = resp.bytes().await?;
    debug!("Received {} bytes of {media_type}", data.len());

    Ok(Image { data, media_type })
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::image_model::{Category, ReferenceImage};

    #[tokio::test]
    async fn payload_without_sketch() {
        let payload = SketchPayload::build(&SketchRequest {
            category: Category::Cake,
            sketch: None,
        })
        .await
        .unwrap();

        expect![[r#"
            SketchPayload {
                prompt: "fun cake from a bakery. studio photo, white background.",
                control_strength: "0.6",
                output_format: "webp",
                image: None,
            }
        "#]]
        .assert_debug_eq(&payload);
        assert_eq!(
            payload.field_names(),
            ["prompt", "control_strength", "output_format"]
        );
    }

    #[tokio::test]
    async fn payload_with_sketch() {
        let payload = SketchPayload::build(&SketchRequest {
            category: Category::Toy,
            sketch: Some(ReferenceImage::Bytes(Bytes::from_static(b"png"))),
        })
        .await
        .unwrap();

        assert_eq!(payload.prompt, Category::Toy.prompt());
        assert_eq!(payload.control_strength, "0.6");
        assert_eq!(payload.output_format, "webp");
        assert_eq!(payload.image.as_deref(), Some(&b"png"[..]));
        assert_eq!(
            payload
                .field_names()
                .iter()
                .filter(|n| **n == "image")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn fixed_fields_do_not_depend_on_category() {
        for category in [Category::Cake, Category::Toy] {
            let payload = SketchPayload::build(&SketchRequest {
                category,
                sketch: None,
            })
            .await
            .unwrap();
            assert_eq!(payload.control_strength, CONTROL_STRENGTH);
            assert_eq!(payload.output_format, OUTPUT_FORMAT);
        }
    }
}
