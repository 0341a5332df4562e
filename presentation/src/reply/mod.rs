//! Outbound replies
//!
//! A [`Reply`] is what the bot sends back for one event: text (with
//! Markdown links), an optional poster, inline buttons, and a hint whether
//! it should replace the message whose button was pressed.

mod composer;
mod toast;

pub use composer::ReplyComposer;
pub use toast::{TOASTS, random_toast};

use serde::Serialize;

/// Inline button: what the participant sees and the token it sends back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub value: String,
}

impl Button {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How a reply reaches the chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Delivery {
    /// Send as a new message
    #[default]
    New,
    /// Replace the message whose button triggered the event
    EditPrevious,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Button>,
    /// Poster URL, sent as a photo with the text as caption
    pub image: Option<String>,
    pub delivery: Delivery,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
            image: None,
            delivery: Delivery::New,
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn editing(mut self) -> Self {
        self.delivery = Delivery::EditPrevious;
        self
    }

    /// Settle the delivery for the kind of event being answered
    ///
    /// Only a button press has a message to edit, and a poster always goes
    /// out as a fresh photo.
    pub fn for_callback(mut self, is_callback: bool) -> Self {
        if !is_callback || self.image.is_some() {
            self.delivery = Delivery::New;
        }
        self
    }

    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }
}
