use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::{
    Result,
    eyre::{WrapErr as _, eyre},
};
use iced::{
    Element, Font, Length, Subscription, Task,
    font::{self},
    padding,
    widget::{container, scrollable, text},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    context::Config,
    message::{ContextMessage, Message},
    state::{Magic, Modal, State, StateExt, options_menu::OptionsMenu},
};

pub mod cli;
pub mod context;
pub mod message;
pub mod state;

pub const APP_NAME: &str = "Sketch Magic";
const PROGRESS_TICK: Duration = Duration::from_millis(30);

pub struct Gui {
    state: Box<dyn State>,
    ctx: context::Context,
}

impl Gui {
    pub fn new(mb_config: Option<Config>) -> Self {
        if let Some(cfg) = mb_config {
            Gui {
                state: Magic.boxed(),
                ctx: context::Context::from_config(cfg),
            }
        } else {
            let config = Config::default();
            Gui {
                state: Modal::message(
                    OptionsMenu::new(&config).boxed(),
                    "Welcome",
                    indoc::indoc! {"
                    Hi, since this is your first time starting Sketch Magic, please enter your
                    Stability AI API key. You can also pick what your sketch shows and where
                    the sketch file lives. Without a sketch, the image is generated from the
                    prompt alone.
                    "
                    },
                )
                .boxed(),
                ctx: context::Context::from_config(config),
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.try_update(message) {
            Ok(task) => task,
            Err(e) => {
                self.state = Modal::message(self.state.clone(), "Error", format!("{e:?}")).boxed();
                Task::none()
            }
        }
    }

    fn try_update(&mut self, message: Message) -> Result<Task<Message>> {
        match message {
            Message::Ui(ui_message) => {
                let cmd = self.state.update(ui_message, &mut self.ctx)?;
                if let Some(new_state) = cmd.transition {
                    self.state = new_state;
                }
                Ok(cmd.task.unwrap_or(Task::none()))
            }
            Message::Context(context_message) => {
                if let Some(note) = self.ctx.update(context_message) {
                    self.state =
                        Modal::message(self.state.clone(), note.title, note.message).boxed();
                }
                Ok(Task::none())
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.state.view(&self.ctx).map(Message::from)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.ctx.magic.is_busy() {
            iced::time::every(PROGRESS_TICK).map(|_| Message::Context(ContextMessage::Tick))
        } else {
            Subscription::none()
        }
    }
}

pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let src = fs::read_to_string(path)?;
    Ok(ron::from_str(&src)?)
}

pub fn save_ron_file<T: Serialize>(path: &Path, x: &T) -> Result<()> {
    Ok(fs::write(path, &ron::to_string(x)?)?)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join("sketch_magic.ron"))
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        Ok(None)
    } else {
        load_ron_file(&path).map(Some)
    }
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let path = config_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    save_ron_file(&path, cfg)?;
    Ok(())
}

macro_rules! elem_list {
    ($($elems:expr),+ $(,)?) => {
        [$(iced::Element::from($elems)),*]
    };
}
pub(crate) use elem_list;

fn bold_text<'a>(t: impl text::IntoFragment<'a>) -> iced::widget::Text<'a> {
    iced::widget::text(t).font(bold_default_font())
}

fn bold_default_font() -> Font {
    Font {
        weight: font::Weight::Bold,
        ..Font::DEFAULT
    }
}

fn top_level_container<'a, T: Send + 'static>(
    elem: impl Into<Element<'a, T>>,
) -> container::Container<'a, T> {
    container(
        container(scrollable(
            container(elem).padding(padding::all(10).right(20)),
        ))
        .padding(20)
        .max_width(800),
    )
    .center(Length::Fill)
}

pub trait TryIntoExt<T> {
    fn try_into_ex(self) -> color_eyre::Result<T>;
}

impl<T, Target, E> TryIntoExt<Target> for T
where
    T: TryInto<Target, Error = E>,
    T: fmt::Debug,
    T: Clone,
    E: std::error::Error + Send + Sync + 'static,
{
    fn try_into_ex(self) -> color_eyre::Result<Target> {
        self.clone()
            .try_into()
            .with_context(|| format!("{self:#?}"))
    }
}

#[cfg(test)]
mod tests {
    use engine::image_model::{Category, GenerationError, Image};

    use super::*;

    fn config() -> Config {
        Config {
            api_key: "sk-test".into(),
            category: Category::Toy,
            sketch: None,
            base_url: None,
            category_name: None,
        }
    }

    #[test]
    fn config_round_trips_through_ron() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cfg.ron");
        let cfg = Config {
            sketch: Some("/tmp/sketch.png".into()),
            ..config()
        };
        save_ron_file(&path, &cfg)?;
        let read: Config = load_ron_file(&path)?;
        assert_eq!(read, cfg);
        Ok(())
    }

    #[test]
    fn without_config_welcome_is_shown() {
        let gui = Gui::new(None);
        let state = format!("{:?}", gui.state);
        assert!(state.contains("Welcome"), "{state}");
        assert!(state.contains("OptionsMenu"), "{state}");
    }

    #[test]
    fn failed_generation_opens_error_dialog() {
        let mut gui = Gui::new(Some(config()));
        let _ = gui.update(Message::Context(ContextMessage::ImageReady(Err(
            GenerationError::Service {
                status: 401,
                body: "unauthorized".into(),
            },
        ))));

        let state = format!("{:?}", gui.state);
        assert!(state.contains("MessageDialog"), "{state}");
        assert!(state.contains("title: \"Error\""), "{state}");
        assert!(!gui.ctx.magic.is_busy());
        assert!(gui.ctx.generated_image.is_none());
    }

    #[test]
    fn successful_generation_keeps_screen() {
        let mut gui = Gui::new(Some(config()));
        let _ = gui.update(Message::Context(ContextMessage::ImageReady(Ok(Image {
            data: vec![1u8, 2, 3].into(),
            media_type: "image/webp".into(),
        }))));

        assert_eq!(format!("{:?}", gui.state), "Magic");
        let img = gui.ctx.generated_image.as_ref().unwrap();
        assert_eq!(img.uri.decode().unwrap(), [1, 2, 3]);
    }
}
