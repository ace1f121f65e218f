use std::{path::PathBuf, pin::Pin};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub mod error;
pub use error::GenerationError;

pub mod stability;
pub use stability::StabilitySketch;

use crate::{ImgModBox, data_uri::DataUri};

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Category {
    #[default]
    Cake,
    Toy,
}

impl Category {
    /// Only the exact name "Cake" selects the cake prompt, everything else is a toy.
    pub fn from_name(name: &str) -> Self {
        if name == "Cake" {
            Category::Cake
        } else {
            Category::Toy
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Category::Cake => "fun cake from a bakery. studio photo, white background.",
            Category::Toy => "fun stuffed toy. studio photo, white background.",
        }
    }

    /// The line shown while a request for this category is running
    pub fn status_message(&self) -> String {
        status_message(&self.to_string())
    }
}

/// Status line for a category given by name, free form names are kept as typed
pub fn status_message(category_name: &str) -> String {
    format!(
        "Your awesome {} sketch gets some magic..",
        category_name.to_uppercase()
    )
}

/// The sketch the generated image is based on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceImage {
    Path(PathBuf),
    Bytes(Bytes),
}

impl ReferenceImage {
    pub async fn load(&self) -> Result<Bytes, GenerationError> {
        match self {
            ReferenceImage::Path(path) => Ok(tokio::fs::read(path).await?.into()),
            ReferenceImage::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SketchRequest {
    pub category: Category,
    pub sketch: Option<ReferenceImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub data: Bytes,
    pub media_type: String,
}

impl Image {
    pub fn to_data_uri(&self) -> DataUri {
        DataUri::encode(&self.media_type, &self.data)
    }
}

pub trait ImageModel {
    fn get_image<'a>(
        &'a self,
        request: &'a SketchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Image, GenerationError>> + Send + 'a>>;

    fn clone(&self) -> ImgModBox;
}
