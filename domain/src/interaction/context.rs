//! Semantic context of an inbound event

use serde::{Deserialize, Serialize};

/// What an inbound token means given the participant's step
///
/// Drives both the state change (when actionable) and the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Context {
    Start,
    About,
    CreateRoom,
    EnterRoom,
    Exit,
    RoomFound,
    StartChoice,
    JoinRoom,
    Discard,
    Like,
    ChoiceMade,
    ShowResult,
    End,
    /// Nothing matched; the reply is a fallback
    Unrecognized,
}

impl Context {
    /// Control tokens that map one-to-one onto a context
    pub const CONTROL_TOKENS: [(&'static str, Context); 5] = [
        ("create-room", Context::CreateRoom),
        ("enter-room", Context::EnterRoom),
        ("exit", Context::Exit),
        ("room-found", Context::RoomFound),
        ("start-choice", Context::StartChoice),
    ];

    /// Context named by a control token, if it is one
    pub fn from_control_token(token: &str) -> Option<Self> {
        Self::CONTROL_TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, c)| *c)
    }

    /// Wire name; empty for [`Context::Unrecognized`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Start => "start",
            Context::About => "about",
            Context::CreateRoom => "create-room",
            Context::EnterRoom => "enter-room",
            Context::Exit => "exit",
            Context::RoomFound => "room-found",
            Context::StartChoice => "start-choice",
            Context::JoinRoom => "join-room",
            Context::Discard => "discard",
            Context::Like => "like",
            Context::ChoiceMade => "choice-made",
            Context::ShowResult => "show-result",
            Context::End => "end",
            Context::Unrecognized => "",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Unrecognized => f.write_str("unrecognized"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Classifier output: the context and whether it changes state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub context: Context,
    pub actionable: bool,
}

impl Classification {
    pub fn new(context: Context, actionable: bool) -> Self {
        Self {
            context,
            actionable,
        }
    }

    pub fn unrecognized() -> Self {
        Self::new(Context::Unrecognized, false)
    }
}
