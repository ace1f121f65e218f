use derive_more::{From, TryInto};
use engine::image_model::{GenerationError, Image};

#[derive(Debug, Clone, From)]
pub enum Message {
    Ui(UiMessage),
    Context(ContextMessage),
}

/// Messages routed to the active state
#[derive(Debug, Clone, From, TryInto)]
pub enum UiMessage {
    Magic(ui_messages::Magic),
    OptionsMenu(ui_messages::OptionsMenu),
    MessageDialog(ui_messages::MessageDialog),
}

/// Messages handled by the context, no matter which state is active
#[derive(Debug, Clone)]
pub enum ContextMessage {
    ImageReady(Result<Image, GenerationError>),
    Tick,
}

pub mod ui_messages {
    use engine::image_model::Category;
    use iced::widget::text_editor;

    #[derive(Debug, Clone)]
    pub enum Magic {
        DoMagic,
        CopyDataUri,
        OpenOptions,
    }

    #[derive(Debug, Clone)]
    pub enum OptionsMenu {
        ApiKeyChanged(String),
        SelectCategory(Category),
        SketchPathChanged(String),
        BaseUrlChanged(String),
        Ok,
    }

    #[derive(Debug, Clone)]
    pub enum MessageDialog {
        Confirm,
        EditAction(text_editor::Action),
    }
}
