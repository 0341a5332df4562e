//! Console line parsing

use pickflick_domain::ParticipantId;

/// What a console line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Nothing typed
    Empty,
    Quit,
    Help,
    /// `/as <id>`: act as another participant
    SwitchParticipant(ParticipantId),
    /// `/as` with a missing or unreadable id
    BadParticipant(String),
    /// Plain line, sent as a text message
    Text(String),
    /// `!token`: press a button carrying `token`
    Press(String),
    /// `#n`: press the n-th button (1-indexed) of the last reply
    PressNth(usize),
}

impl ConsoleInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ConsoleInput::Empty;
        }

        match line {
            "/quit" | "/exit" | "/q" => return ConsoleInput::Quit,
            "/help" | "/h" | "/?" => return ConsoleInput::Help,
            _ => {}
        }

        if let Some(rest) = line.strip_prefix("/as")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            return match rest.trim().parse::<ParticipantId>() {
                Ok(id) => ConsoleInput::SwitchParticipant(id),
                Err(_) => ConsoleInput::BadParticipant(rest.trim().to_string()),
            };
        }

        if let Some(token) = line.strip_prefix('!')
            && !token.is_empty()
        {
            return ConsoleInput::Press(token.to_string());
        }

        if let Some(n) = line.strip_prefix('#')
            && let Ok(n) = n.parse::<usize>()
            && n > 0
        {
            return ConsoleInput::PressNth(n);
        }

        ConsoleInput::Text(line.to_string())
    }
}
