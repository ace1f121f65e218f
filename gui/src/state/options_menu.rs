use std::path::PathBuf;

use color_eyre::{Result, eyre::ensure};
use engine::image_model::Category;
use iced::{
    Length,
    widget::{button, column, radio, row, space, text, text_input},
};
use strum::IntoEnumIterator;

use crate::{
    TryIntoExt, bold_text,
    context::{Config, Context},
    elem_list,
    message::{UiMessage, ui_messages::OptionsMenu as MyMessage},
    save_config,
    state::{Magic, State, StateCommand, cmd},
    top_level_container,
};

#[derive(Debug, Clone)]
pub struct OptionsMenu {
    sketch_input: String,
    base_url_input: String,
}

impl OptionsMenu {
    pub fn new(config: &Config) -> Self {
        Self {
            sketch_input: config
                .sketch
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            base_url_input: config.base_url.clone().unwrap_or_default(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

impl State for OptionsMenu {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        let msg: MyMessage = event.try_into_ex()?;

        use MyMessage::*;
        match msg {
            ApiKeyChanged(val) => {
                ctx.config.api_key = val;
                cmd::none()
            }

            SelectCategory(category) => {
                ctx.config.category = category;
                ctx.config.category_name = None;
                cmd::none()
            }

            SketchPathChanged(val) => {
                ctx.config.sketch = non_empty(&val).map(PathBuf::from);
                self.sketch_input = val;
                cmd::none()
            }

            BaseUrlChanged(val) => {
                ctx.config.base_url = non_empty(&val).map(str::to_string);
                self.base_url_input = val;
                cmd::none()
            }

            Ok => {
                if let Some(sketch) = &ctx.config.sketch {
                    ensure!(
                        sketch.is_file(),
                        "Sketch file {} does not exist",
                        sketch.display()
                    );
                }
                save_config(&ctx.config)?;
                cmd::transition(Magic)
            }
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> iced::Element<'a, UiMessage> {
        let items = elem_list![
            bold_text("Options").width(Length::Fill).center(),
            space().height(20),
            text("Stability AI API Key"),
            text_input("sk-...", &ctx.config.api_key)
                .on_input(|s| MyMessage::ApiKeyChanged(s).into())
                .secure(true)
                .width(Length::Fill),
            space().height(20),
            text("What does your sketch show?"),
            column(Category::iter().map(|c| {
                radio(
                    c.to_string(),
                    c,
                    Some(ctx.config.category),
                    |c| MyMessage::SelectCategory(c).into(),
                )
                .into()
            }))
            .spacing(10),
            space().height(20),
            text("Sketch file (optional)"),
            text_input("/path/to/sketch.png", &self.sketch_input)
                .on_input(|s| MyMessage::SketchPathChanged(s).into())
                .width(Length::Fill),
            space().height(20),
            text("API base URL (optional)"),
            text_input("https://api.stability.ai", &self.base_url_input)
                .on_input(|s| MyMessage::BaseUrlChanged(s).into())
                .width(Length::Fill),
            space().height(30),
            row![button("Ok").on_press(MyMessage::Ok.into())],
        ];

        top_level_container(
            column(items)
                .spacing(12)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}
