use crate::image_model::ImageModel;

pub mod data_uri;
pub mod image_model;
pub mod magic;

pub type ImgModBox = Box<dyn ImageModel + Send + Sync>;
