//! Console rendering of bot replies

use crate::bot::Dispatched;
use crate::reply::{Delivery, Reply};
use colored::Colorize;
use pickflick_domain::ParticipantId;

/// Formats replies for a terminal standing in for the chat client
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format everything the participant would see for one event
    pub fn format_dispatched(dispatched: &Dispatched) -> String {
        let mut output = String::new();
        if let Some(toast) = dispatched.toast {
            output.push_str(&format!("{}\n", format!("({})", toast).yellow().italic()));
        }
        output.push_str(&Self::format_reply(dispatched.view.participant, &dispatched.reply));
        output
    }

    /// Format a reply with numbered buttons
    pub fn format_reply(participant: ParticipantId, reply: &Reply) -> String {
        let mut output = String::new();

        let delivery = match reply.delivery {
            Delivery::New => "new",
            Delivery::EditPrevious => "edit",
        };
        output.push_str(&format!(
            "{}\n",
            format!("── bot → {} ({}) ──", participant, delivery).dimmed()
        ));

        if let Some(image) = &reply.image {
            output.push_str(&format!("{} {}\n", "[poster]".magenta(), image));
        }

        output.push_str(reply.text.trim_end());
        output.push('\n');

        if !reply.buttons.is_empty() {
            let buttons: Vec<String> = reply
                .buttons
                .iter()
                .enumerate()
                .map(|(i, b)| format!("[{}] {}", i + 1, b.label).cyan().to_string())
                .collect();
            output.push_str(&format!("{}\n", buttons.join("  ")));
        }

        output
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Button;

    #[test]
    fn test_format_reply_numbers_buttons() {
        colored::control::set_override(false);
        let reply = Reply::new("Room found!").with_buttons(vec![
            Button::new("Continue", "room-found"),
            Button::new("Exit", "exit"),
        ]);
        let output = ConsoleFormatter::format_reply(ParticipantId::new(7), &reply);
        assert_eq!(
            output,
            "── bot → 7 (new) ──\nRoom found!\n[1] Continue  [2] Exit\n"
        );
    }

    #[test]
    fn test_format_reply_with_poster() {
        colored::control::set_override(false);
        let reply = Reply::new("1. [Heat](h)\n\nPlot\n").with_image("p.jpg");
        let output = ConsoleFormatter::format_reply(ParticipantId::new(7), &reply);
        assert!(output.contains("[poster] p.jpg\n1. [Heat](h)\n\nPlot\n"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
