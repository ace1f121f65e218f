use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use engine::{
    image_model::{Category, ImageModel, ReferenceImage, SketchRequest, StabilitySketch},
    magic::{MagicState, generate},
};

#[derive(clap::Parser)]
struct Arg {
    key: String,
    category: Category,
    #[arg(long)]
    sketch: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;
    let Arg {
        key,
        category,
        sketch,
        base_url,
    } = Arg::parse();

    let mut model = StabilitySketch::new(key);
    if let Some(url) = base_url {
        model = model.with_base_url(url);
    }
    let request = SketchRequest {
        category,
        sketch: sketch.map(ReferenceImage::Path),
    };

    println!("{}", category.status_message());
    let mut state = MagicState::default();
    let mut published = None;
    state.begin(|img| published = img);
    let outcome = generate(ImageModel::clone(&model), request).await;
    if let Some(note) = state.finish(outcome, |img| published = img) {
        eprintln!("{}: {}", note.title, note.message);
        std::process::exit(1);
    }

    if let Some(uri) = published {
        std::fs::write("output.webp", uri.decode()?)?;
        println!(
            "Saved image as output.webp, data URI of {} is {} chars",
            uri.media_type(),
            uri.as_str().len()
        );
    }

    Ok(())
}
