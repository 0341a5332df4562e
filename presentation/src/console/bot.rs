//! Interactive console transport
//!
//! A reedline session standing in for the chat client. Each line becomes an
//! [`InboundEvent`] for the acting participant; replies are printed with
//! numbered buttons that `#n` presses.

use super::input::ConsoleInput;
use crate::bot::BotDispatcher;
use crate::config::ConsoleConfig;
use crate::inbound::{InboundEvent, InboundKind};
use crate::output::console::ConsoleFormatter;
use crate::reply::Reply;
use colored::Colorize;
use pickflick_application::{RoomCodeGenerator, SessionStore, SlateSource};
use pickflick_domain::ParticipantId;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use std::path::Path;
use tracing::warn;

const HISTORY_SIZE: usize = 500;

/// What the console remembers between lines
#[derive(Debug)]
pub(crate) struct ConsoleState {
    pub(crate) participant: ParticipantId,
    last_reply: Option<Reply>,
    next_message_id: i64,
    next_callback_id: u64,
}

/// What to do with a parsed line
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ConsoleAction {
    Send(InboundEvent),
    Print(String),
    Quit,
    Nothing,
}

impl ConsoleState {
    pub(crate) fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            last_reply: None,
            next_message_id: 1,
            next_callback_id: 1,
        }
    }

    pub(crate) fn remember(&mut self, reply: Reply) {
        self.last_reply = Some(reply);
    }

    /// Turn one console line into an action
    pub(crate) fn interpret(&mut self, input: ConsoleInput) -> ConsoleAction {
        match input {
            ConsoleInput::Empty => ConsoleAction::Nothing,
            ConsoleInput::Quit => ConsoleAction::Quit,
            ConsoleInput::Help => ConsoleAction::Print(help_text()),
            ConsoleInput::SwitchParticipant(id) => {
                self.participant = id;
                self.last_reply = None;
                ConsoleAction::Print(format!("Now acting as participant {}", id))
            }
            ConsoleInput::BadParticipant(raw) => {
                ConsoleAction::Print(format!("Not a participant id: '{}'", raw))
            }
            ConsoleInput::Text(text) => ConsoleAction::Send(self.text(text)),
            ConsoleInput::Press(token) => ConsoleAction::Send(self.press(token)),
            ConsoleInput::PressNth(n) => {
                let token = self
                    .last_reply
                    .as_ref()
                    .and_then(|reply| reply.button(n - 1))
                    .map(|button| button.value.clone());
                match token {
                    Some(token) => ConsoleAction::Send(self.press(token)),
                    None => ConsoleAction::Print(format!("There is no button #{}", n)),
                }
            }
        }
    }

    fn text(&mut self, token: String) -> InboundEvent {
        let message_id = self.next_message_id;
        self.next_message_id += 1;
        InboundEvent {
            participant: self.participant,
            token,
            kind: InboundKind::Text { message_id },
        }
    }

    fn press(&mut self, token: String) -> InboundEvent {
        let callback_id = self.next_callback_id.to_string();
        self.next_callback_id += 1;
        InboundEvent {
            participant: self.participant,
            token,
            kind: InboundKind::Callback {
                callback_id,
                message_id: self.next_message_id - 1,
            },
        }
    }
}

fn help_text() -> String {
    [
        "Commands:",
        "  <text>        - Send a text message (e.g. /start, a room code)",
        "  !<token>      - Press a button with that token (e.g. !like-3)",
        "  #<n>          - Press the n-th button of the last reply",
        "  /as <id>      - Act as another participant",
        "  /help, /h, /? - Show this help",
        "  /quit, /q     - Exit",
    ]
    .join("\n")
}

/// Interactive console bot
pub struct ConsoleBot<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    dispatcher: BotDispatcher<S, L, R>,
    config: ConsoleConfig,
}

impl<S, L, R> ConsoleBot<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    pub fn new(dispatcher: BotDispatcher<S, L, R>, config: ConsoleConfig) -> Self {
        Self { dispatcher, config }
    }

    pub fn dispatcher(&self) -> &BotDispatcher<S, L, R> {
        &self.dispatcher
    }

    /// Run the interactive session until `/quit` or end of input
    pub async fn run(&self) -> io::Result<()> {
        let mut line_editor = Reedline::create();
        if let Some(path) = self.config.history_path() {
            if let Err(e) = create_history_dir(&path) {
                warn!("Could not create history directory for {}: {}", path.display(), e);
            }
            match FileBackedHistory::with_file(HISTORY_SIZE, path.clone()) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(e) => warn!("Could not open history file {}: {}", path.display(), e),
            }
        }

        let mut state = ConsoleState::new(self.config.participant);
        self.print_welcome(&state);

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(format!("pickflick@{}", state.participant)),
                DefaultPromptSegment::Empty,
            );

            let line = match line_editor.read_line(&prompt)? {
                Signal::Success(line) => line,
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                #[allow(unreachable_patterns)]
                _ => continue,
            };

            match state.interpret(ConsoleInput::parse(&line)) {
                ConsoleAction::Nothing => {}
                ConsoleAction::Quit => {
                    println!("Bye!");
                    break;
                }
                ConsoleAction::Print(text) => println!("{}", text),
                ConsoleAction::Send(event) => match self.dispatcher.dispatch(event).await {
                    Ok(dispatched) => {
                        println!();
                        print!("{}", ConsoleFormatter::format_dispatched(&dispatched));
                        println!();
                        state.remember(dispatched.reply);
                    }
                    Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                },
            }
        }

        Ok(())
    }

    fn print_welcome(&self, state: &ConsoleState) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            PickFlick - Console Bot          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Acting as participant {}", state.participant);
        println!();
        println!("{}", help_text());
        println!();
    }
}

fn create_history_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Button;

    fn state() -> ConsoleState {
        ConsoleState::new(ParticipantId::new(1))
    }

    #[test]
    fn test_create_history_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("pickflick").join("history.txt");
        create_history_dir(&nested).unwrap();
        assert!(dir.path().join("pickflick").is_dir());

        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        assert!(create_history_dir(&blocker.join("history.txt")).is_err());
    }

    #[test]
    fn test_text_lines_become_text_events() {
        let mut state = state();
        let ConsoleAction::Send(event) = state.interpret(ConsoleInput::parse("/start")) else {
            panic!("expected an event");
        };
        assert_eq!(event.token, "/start");
        assert_eq!(event.kind, InboundKind::Text { message_id: 1 });
    }

    #[test]
    fn test_numbered_press_uses_last_reply() {
        let mut state = state();
        assert!(matches!(
            state.interpret(ConsoleInput::PressNth(1)),
            ConsoleAction::Print(_)
        ));

        state.remember(Reply::new("menu").with_buttons(vec![
            Button::new("Create", "create-room"),
            Button::new("Enter", "enter-room"),
        ]));
        let ConsoleAction::Send(event) = state.interpret(ConsoleInput::PressNth(2)) else {
            panic!("expected an event");
        };
        assert_eq!(event.token, "enter-room");
        assert!(event.is_callback());
        assert!(matches!(
            state.interpret(ConsoleInput::PressNth(3)),
            ConsoleAction::Print(_)
        ));
    }

    #[test]
    fn test_switching_participant_forgets_buttons() {
        let mut state = state();
        state.remember(Reply::new("menu").with_buttons(vec![Button::new("Create", "create-room")]));
        state.interpret(ConsoleInput::SwitchParticipant(ParticipantId::new(2)));
        assert_eq!(state.participant, ParticipantId::new(2));

        assert!(matches!(
            state.interpret(ConsoleInput::PressNth(1)),
            ConsoleAction::Print(_)
        ));
    }

    #[test]
    fn test_quit() {
        assert_eq!(state().interpret(ConsoleInput::Quit), ConsoleAction::Quit);
    }
}
