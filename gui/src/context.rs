use std::path::PathBuf;

use engine::{
    ImgModBox,
    data_uri::DataUri,
    image_model::{self, Category, ReferenceImage, SketchRequest, StabilitySketch},
    magic::{MagicState, Notification, generate},
};
use iced::{Task, advanced::image::Handle as ImgHandle};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::message::{ContextMessage, Message};

const PROGRESS_STEP: f32 = 0.02;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub category: Category,
    #[serde(default)]
    pub sketch: Option<PathBuf>,
    /// Overrides the Stability API host
    #[serde(default)]
    pub base_url: Option<String>,
    /// Category as named on the command line, only used for display
    #[serde(skip)]
    pub category_name: Option<String>,
}

impl Config {
    pub fn make_model(&self) -> ImgModBox {
        let model = StabilitySketch::new(self.api_key.clone());
        match &self.base_url {
            Some(url) => Box::new(model.with_base_url(url.clone())),
            None => Box::new(model),
        }
    }

    pub fn status_message(&self) -> String {
        match &self.category_name {
            Some(name) => image_model::status_message(name),
            None => self.category.status_message(),
        }
    }

    pub fn sketch_request(&self) -> SketchRequest {
        SketchRequest {
            category: self.category,
            sketch: self.sketch.clone().map(ReferenceImage::Path),
        }
    }
}

pub struct GeneratedImage {
    pub uri: DataUri,
    pub handle: ImgHandle,
}

pub struct Context {
    pub config: Config,
    pub magic: MagicState,
    pub generated_image: Option<GeneratedImage>,
    pub progress: f32,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            magic: MagicState::default(),
            generated_image: None,
            progress: 0.,
        }
    }

    /// Starts one request, its outcome comes back as `ContextMessage::ImageReady`
    pub fn do_magic(&mut self) -> Task<Message> {
        let Self {
            magic,
            generated_image,
            ..
        } = self;
        magic.begin(|img| publish(generated_image, img));
        self.progress = 0.;

        let model = self.config.make_model();
        let request = self.config.sketch_request();
        Task::perform(generate(model, request), |res| {
            ContextMessage::ImageReady(res).into()
        })
    }

    pub fn update(&mut self, message: ContextMessage) -> Option<Notification> {
        match message {
            ContextMessage::ImageReady(outcome) => {
                let Self {
                    magic,
                    generated_image,
                    ..
                } = self;
                magic.finish(outcome, |img| publish(generated_image, img))
            }
            ContextMessage::Tick => {
                self.progress = (self.progress + PROGRESS_STEP) % 1.;
                None
            }
        }
    }
}

fn publish(slot: &mut Option<GeneratedImage>, uri: Option<DataUri>) {
    *slot = uri.and_then(|uri| match uri.decode() {
        Ok(bytes) => Some(GeneratedImage {
            handle: ImgHandle::from_bytes(bytes),
            uri,
        }),
        Err(e) => {
            warn!("Dropping undecodable image: {e}");
            None
        }
    });
}
