//! Renders a handled event into the bot's reply

use super::{Button, Reply};
use pickflick_application::{ActionOutcome, CandidateView, EventView, RoomResults};
use pickflick_domain::{Context, RoomCode, VoteToken};

const ROOM_MENU: &str = "Create a room or enter an existing room?";
const ROOM_REQUIRED: &str = "A room is required to find a common choice between multiple friends.";

/// Stateless mapping from [`EventView`] to [`Reply`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyComposer;

impl ReplyComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, view: &EventView) -> Reply {
        let room = view.record.as_ref().and_then(|r| r.room.as_ref());

        match view.context() {
            Context::Start => Reply::new(format!("{}\n\n{}", ROOM_REQUIRED, ROOM_MENU))
                .with_buttons(room_menu())
                .editing(),
            Context::CreateRoom => created_room(room).editing(),
            Context::EnterRoom => Reply::new(
                "Okay tell me the room number? You need to ask your friends if you do not already have one.",
            )
            .editing(),
            Context::JoinRoom => joined_room(&view.outcome, room),
            Context::RoomFound => slate_intro(&view.outcome).editing(),
            Context::Exit => Reply::new("All clear! Have fun manually deciding movies 😂")
                .with_buttons(vec![Button::new("Start Again", "/start")]),
            Context::StartChoice | Context::Like | Context::Discard => match &view.candidate {
                Some(candidate) => candidate_card(candidate).editing(),
                None if view.record.is_none() => {
                    Reply::new(format!("{}\n\n{}", ROOM_REQUIRED, ROOM_MENU))
                        .with_buttons(room_menu())
                }
                None => Reply::new("There are no movies to choose from right now.")
                    .with_buttons(vec![
                        Button::new("Try again", "room-found"),
                        Button::new("Meh!", "exit"),
                    ]),
            },
            Context::ChoiceMade => Reply::new("Great you are done choosing!").with_buttons(vec![
                Button::new("Results?", "show-result"),
                Button::new("Choose Again", "start-choice"),
            ]),
            Context::ShowResult => results(view.results.as_ref()).editing(),
            Context::End => Reply::new(ROOM_MENU).with_buttons(room_menu()),
            Context::About => Reply::new(
                "*PickFlick*:\n\n\
                 Open Source on [GitHub](https://github.com/Donnie/PickFlick)\n\
                 No personally identifiable information is stored or used by this bot.",
            ),
            Context::Unrecognized => Reply::new("I didn't get you"),
        }
    }
}

fn room_menu() -> Vec<Button> {
    vec![
        Button::new("Create", "create-room"),
        Button::new("Enter", "enter-room"),
    ]
}

fn created_room(room: Option<&RoomCode>) -> Reply {
    match room {
        Some(room) => Reply::new(format!(
            "Here is your room number: ```{}```.\nNow share it with your friends.",
            room
        ))
        .with_buttons(vec![Button::new("Done", "room-found")]),
        None => Reply::new("We could not create a room for you. Try again?").with_buttons(vec![
            Button::new("Try again!", "create-room"),
            Button::new("Enter", "enter-room"),
        ]),
    }
}

fn joined_room(outcome: &ActionOutcome, room: Option<&RoomCode>) -> Reply {
    if let ActionOutcome::AlreadyInRoom(current) = outcome {
        return Reply::new(format!(
            "You are already in room ```{}```.\nLeave it first to join another one.",
            current
        ))
        .with_buttons(vec![Button::new("Continue", "room-found")]);
    }
    let found = match outcome {
        ActionOutcome::RoomJoined(_) => true,
        ActionOutcome::RoomNotFound | ActionOutcome::NoSession => false,
        _ => room.is_some(),
    };
    if found {
        Reply::new("Room found!").with_buttons(vec![Button::new("Continue", "room-found")])
    } else {
        Reply::new("We could not find a room by that number")
            .with_buttons(room_menu())
            .editing()
    }
}

fn slate_intro(outcome: &ActionOutcome) -> Reply {
    if let ActionOutcome::SlateUnavailable(_) = outcome {
        return Reply::new("There are no movies to choose from right now.").with_buttons(vec![
            Button::new("Try again", "room-found"),
            Button::new("Meh!", "exit"),
        ]);
    }
    Reply::new(
        "Now I would show you top 10 movies this week. You have to like or dislike. \
         You could also stop it anytime. Alright?",
    )
    .with_buttons(vec![
        Button::new("Meh!", "exit"),
        Button::new("Cool!", "start-choice"),
    ])
}

fn candidate_card(candidate: &CandidateView) -> Reply {
    let n = candidate.number;
    let movie = &candidate.movie;
    let reply = Reply::new(format!(
        "{}. [{}]({})\n\n{}\n",
        n, movie.title, movie.link, movie.description
    ))
    .with_buttons(vec![
        Button::new("👎", VoteToken::discard(n).to_string()),
        Button::new("👍", VoteToken::like(n).to_string()),
        Button::new("Stop", "choice-made"),
    ]);
    if movie.poster.is_empty() {
        reply
    } else {
        reply.with_image(movie.poster.clone())
    }
}

fn results(results: Option<&RoomResults>) -> Reply {
    let mut text = match results {
        Some(results) if results.has_picks() => {
            let mut text = String::from("So your room has chosen:\n\n");
            for (i, movie) in results.picks.iter().enumerate() {
                text.push_str(&format!("{}. [{}]({})\n", i + 1, movie.title, movie.link));
            }
            text
        }
        _ => "Sorry! You do not have any common options.\nRecommended number of choices is six."
            .to_string(),
    };

    let pending = results.map_or(0, |r| r.consensus.pending_count());
    if pending > 0 {
        text.push_str(&format!(
            "\n\n{} of the movies are still waiting for votes.",
            pending
        ));
    }
    text.push_str("\n\nYou can try results again when your friends finish.");

    Reply::new(text).with_buttons(vec![
        Button::new("Results?", "show-result"),
        Button::new("Choose Again", "start-choice"),
        Button::new("Exit", "end"),
    ])
}
