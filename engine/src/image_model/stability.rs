use std::pin::Pin;

use log::debug;

use crate::{
    ImgModBox,
    image_model::{GenerationError, Image, ImageModel, SketchRequest},
};

pub mod stability_api;
use stability_api::SketchPayload;

/// Stability AI "control/sketch": turns a sketch plus a prompt into an image
#[derive(Clone)]
pub struct StabilitySketch {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl StabilitySketch {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: stability_api::DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl ImageModel for StabilitySketch {
    fn get_image<'a>(
        &'a self,
        request: &'a SketchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Image, GenerationError>> + Send + 'a>> {
        Box::pin(async move {
            debug!("Generating {} image", request.category);
            let payload = SketchPayload::build(request).await?;
            stability_api::query(payload, &self.base_url, &self.api_key, &self.client).await
        })
    }

    fn clone(&self) -> ImgModBox {
        Box::new(Clone::clone(self))
    }
}
