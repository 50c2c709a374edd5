//! The UI execution context, made explicit.
//!
//! Every user-visible mutation is a [`UiCommand`] posted to a single-consumer
//! queue. The host drains it on the thread that owns its views; nothing in
//! this crate touches UI state directly.

use geo::Rect;
use tokio::sync::mpsc;

use crate::map::{Region, overlay::RouteOverlay};

/// A blocking informational prompt with a single dismiss action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub action: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    ShowUserLocation(bool),
    SetRegion { region: Region, animated: bool },
    SetVisibleRect { rect: Rect, animated: bool },
    RemoveAllOverlays,
    AddOverlay(RouteOverlay),
    SetAddress(String),
    Alert(Alert),
    Notice(String),
}

pub fn ui_queue() -> (UiQueue, UiReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (UiQueue(sender), UiReceiver(receiver))
}

#[derive(Clone, Debug)]
pub struct UiQueue(mpsc::UnboundedSender<UiCommand>);

impl UiQueue {
    pub fn post(&self, command: UiCommand) {
        if let Err(mpsc::error::SendError(command)) = self.0.send(command) {
            tracing::debug!("ui queue closed, dropping {command:?}");
        }
    }
}

#[derive(Debug)]
pub struct UiReceiver(mpsc::UnboundedReceiver<UiCommand>);

impl UiReceiver {
    /// Wait for the next command. `None` once every [`UiQueue`] is gone.
    pub async fn recv(&mut self) -> Option<UiCommand> {
        self.0.recv().await
    }

    pub fn try_recv(&mut self) -> Option<UiCommand> {
        self.0.try_recv().ok()
    }

    /// Everything queued right now.
    pub fn drain(&mut self) -> Vec<UiCommand> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
