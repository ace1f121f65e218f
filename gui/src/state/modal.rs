use std::fmt;

use color_eyre::Result;
use iced::{
    Border, Color, Element, Length, Task,
    widget::{Container, container, scrollable, space, stack},
};

use crate::{
    context::Context,
    message::{Message, UiMessage},
    state::{State, StateCommand, cmd, modal::message::MessageDialog},
};

pub mod message;

pub trait Dialog: fmt::Debug {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<DialogResult>;
    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage>;
}

pub enum DialogResult {
    Stay,
    Close(Task<UiMessage>),
}

/// Shows a dialog on top of a dimmed parent state, returns to the parent once
/// the dialog closes
#[derive(Debug)]
pub struct Modal<D: Dialog> {
    parent: Box<dyn State>,
    dialog: D,
}

impl Modal<MessageDialog> {
    pub fn message(
        parent: Box<dyn State>,
        title: impl Into<String>,
        message: impl AsRef<str>,
    ) -> Self {
        Self::new(parent, MessageDialog::new(title.into(), message.as_ref()))
    }
}

impl<D: Dialog> Modal<D> {
    pub fn new(parent: Box<dyn State>, dialog: D) -> Self {
        Self { parent, dialog }
    }
}

impl<D: Dialog + Clone + 'static> State for Modal<D> {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        match self.dialog.update(event, ctx)? {
            DialogResult::Stay => cmd::none(),
            DialogResult::Close(task) => {
                cmd::transition_with_task(self.parent.clone(), task.map(Message::from))
            }
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        stack![
            self.parent.view(ctx),
            dim_layer(),
            container(self.dialog.view(ctx)).center(Length::Fill)
        ]
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Self {
            parent: self.parent.clone(),
            dialog: self.dialog.clone(),
        })
    }
}

fn dim_layer() -> Element<'static, UiMessage> {
    container(space())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| container::Style::default().background(Color::from_rgba(0., 0., 0., 0.1)))
        .into()
}

fn modal_outer_container<'a>(child: impl Into<Element<'a, UiMessage>>) -> Container<'a, UiMessage> {
    container(scrollable(child))
        .height(Length::Shrink)
        .padding(20)
        .max_width(700)
        .max_height(700)
        .style(|_theme| container::background(Color::WHITE).border(Border::default().rounded(10)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::Config,
        message::ui_messages::MessageDialog as DialogMessage,
        state::{Magic, StateExt},
    };

    #[test]
    fn confirm_returns_to_parent() -> Result<()> {
        let mut ctx = Context::from_config(Config::default());
        let mut modal = Modal::message(Magic.boxed(), "Error", "Failed to fetch image: 500");

        let cmd = modal.update(DialogMessage::Confirm.into(), &mut ctx)?;
        let parent = cmd.transition.expect("modal closes");
        assert_eq!(format!("{parent:?}"), "Magic");
        Ok(())
    }

    #[test]
    fn foreign_message_is_rejected() {
        let mut ctx = Context::from_config(Config::default());
        let mut modal = Modal::message(Magic.boxed(), "Error", "oops");
        let res = modal.update(
            crate::message::ui_messages::Magic::DoMagic.into(),
            &mut ctx,
        );
        assert!(res.is_err());
    }
}
