use std::path::PathBuf;

use engine::image_model::Category;

use crate::context::Config;

/// Overrides for the stored configuration, they are not saved
#[derive(Debug, Default, clap::Parser)]
pub struct Cli {
    /// Stability AI API key
    #[arg(short, long)]
    pub api_key: Option<String>,

    /// What the sketch shows. "Cake" selects the cake prompt, anything else the toy prompt
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sketch the image is generated from
    #[arg(short, long)]
    pub sketch: Option<PathBuf>,
}

impl Cli {
    /// Without a stored config, an api key on the command line is enough to start
    pub fn apply(self, stored: Option<Config>) -> Option<Config> {
        let mut cfg = match (stored, &self.api_key) {
            (Some(cfg), _) => cfg,
            (None, Some(_)) => Config::default(),
            (None, None) => return None,
        };
        if let Some(key) = self.api_key {
            cfg.api_key = key;
        }
        if let Some(name) = self.category {
            cfg.category = Category::from_name(&name);
            cfg.category_name = Some(name);
        }
        if let Some(sketch) = self.sketch {
            cfg.sketch = Some(sketch);
        }
        Some(cfg)
    }
}
