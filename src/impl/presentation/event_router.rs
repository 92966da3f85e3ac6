use crate::entities::{ButtonStates, ClientId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    DoubleClick,
    EnterKey,
    DeleteKey,
    NewShortcut,
    RefreshShortcut,
    UploadRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    OpenEditor(ClientId),
    ReturnPick(ClientId),
    ConfirmDelete(Vec<ClientId>),
    NewClient,
    Refresh,
    Upload(ClientId),
    Ignore,
}

pub struct EventRouter;

impl EventRouter {
    /// Maps a UI event to a command given the current selection and button
    /// state. Events whose action is disabled route to [`UiCommand::Ignore`].
    pub fn route(
        event: UiEvent,
        selection: &[ClientId],
        pick_mode: bool,
        buttons: &ButtonStates,
    ) -> UiCommand {
        let primary = selection.first().copied();
        match event {
            UiEvent::DoubleClick | UiEvent::EnterKey => match primary {
                Some(id) if buttons.edit && pick_mode => UiCommand::ReturnPick(id),
                Some(id) if buttons.edit => UiCommand::OpenEditor(id),
                _ => UiCommand::Ignore,
            },
            UiEvent::DeleteKey if buttons.delete && !selection.is_empty() => {
                UiCommand::ConfirmDelete(selection.to_vec())
            }
            UiEvent::NewShortcut if buttons.new => UiCommand::NewClient,
            UiEvent::RefreshShortcut => UiCommand::Refresh,
            UiEvent::UploadRequested if buttons.upload => {
                primary.map_or(UiCommand::Ignore, UiCommand::Upload)
            }
            _ => UiCommand::Ignore,
        }
    }
}
