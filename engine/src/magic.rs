//! The "do magic" trigger: a busy flag, a callback that publishes the
//! generated image and the mapping of a finished request onto both.

use log::{error, trace};

use crate::{
    ImgModBox,
    data_uri::DataUri,
    image_model::{GenerationError, Image, SketchRequest},
};

/// A message for the user, shown blocking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl From<&GenerationError> for Notification {
    fn from(err: &GenerationError) -> Self {
        let message = match err {
            GenerationError::Service { .. } => format!("{err}\n{}", err.detail()),
            GenerationError::Transport { .. } => err.to_string(),
        };
        Self {
            title: "Error".into(),
            message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagicState {
    busy: bool,
}

impl MagicState {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks the trigger busy and clears whatever was published before.
    /// Triggering again while busy is allowed, the later result wins.
    pub fn begin(&mut self, publish: impl FnOnce(Option<DataUri>)) {
        trace!("Magic started");
        self.busy = true;
        publish(None);
    }

    /// Busy is cleared on every outcome. Only a successful one publishes.
    pub fn finish(
        &mut self,
        outcome: Result<Image, GenerationError>,
        publish: impl FnOnce(Option<DataUri>),
    ) -> Option<Notification> {
        self.busy = false;
        match outcome {
            Ok(image) => {
                trace!("Magic finished with {} bytes", image.data.len());
                publish(Some(image.to_data_uri()));
                None
            }
            Err(err) => {
                match &err {
                    GenerationError::Service { status, .. } => {
                        error!("Failed to fetch image: {status} {}", err.detail())
                    }
                    GenerationError::Transport { reason } => {
                        error!("Error fetching image: {reason}")
                    }
                }
                Some(Notification::from(&err))
            }
        }
    }
}

/// Runs a single request to completion. Owns everything it needs, so it can
/// be handed to an executor as is.
pub async fn generate(model: ImgModBox, request: SketchRequest) -> Result<Image, GenerationError> {
    model.get_image(&request).await
}
