use color_eyre::Result;
use iced::{
    Element, Length,
    alignment::Horizontal,
    widget::{self, button, column, container, progress_bar, responsive, row, space, text},
};
use log::debug;

use crate::{
    TryIntoExt,
    context::Context,
    message::{Message, UiMessage, ui_messages::Magic as MyMessage},
    state::{State, StateCommand, cmd, options_menu::OptionsMenu},
};

/// Share of the available width the generated image takes, it is shown square
const IMAGE_WIDTH_SHARE: f32 = 0.9;

/// The "Do magic" screen: trigger, loading indicator and the published image
#[derive(Debug, Clone)]
pub struct Magic;

impl State for Magic {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        use MyMessage::*;
        match event.try_into_ex()? {
            DoMagic => {
                debug!("Doing magic for {}", ctx.config.category);
                cmd::task(ctx.do_magic())
            }
            CopyDataUri => match &ctx.generated_image {
                Some(img) => cmd::task(iced::clipboard::write::<Message>(
                    img.uri.as_str().to_string(),
                )),
                None => cmd::none(),
            },
            OpenOptions => cmd::transition(OptionsMenu::new(&ctx.config)),
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        let busy = ctx.magic.is_busy();

        let mut col = column![
            row![
                space::horizontal(),
                button("Options").on_press_maybe((!busy).then_some(MyMessage::OpenOptions.into()))
            ],
            button("Do magic").on_press(MyMessage::DoMagic.into()),
        ]
        .spacing(8)
        .align_x(Horizontal::Center);

        if busy {
            col = col.push(
                column![
                    text(ctx.config.status_message()),
                    container(progress_bar(0.0..=1.0, ctx.progress)).max_width(300),
                ]
                .spacing(8)
                .align_x(Horizontal::Center),
            );
        }

        if let Some(img) = &ctx.generated_image {
            col = col.push(button("Copy data URI").on_press(MyMessage::CopyDataUri.into()));
            col = col.push(responsive(move |size| {
                let side = size.width * IMAGE_WIDTH_SHARE;
                Element::from(widget::image(img.handle.clone()).width(side).height(side))
            }));
        }

        container(col).center_x(Length::Fill).padding(20).into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}
