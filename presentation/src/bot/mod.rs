//! Transport-independent bot loop body
//!
//! Every transport (console, replay) feeds [`InboundEvent`]s through one
//! [`BotDispatcher`] and renders the [`Dispatched`] result its own way.

use crate::inbound::InboundEvent;
use crate::reply::{Reply, ReplyComposer, random_toast};
use pickflick_application::{
    EventView, HandleEventError, HandleEventInput, HandleEventUseCase, RoomCodeGenerator,
    SessionStore, SlateSource,
};
use tracing::debug;

/// Result of dispatching one inbound event
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub view: EventView,
    pub reply: Reply,
    /// Acknowledgement for button presses
    pub toast: Option<&'static str>,
}

pub struct BotDispatcher<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    use_case: HandleEventUseCase<S, L, R>,
    composer: ReplyComposer,
}

impl<S, L, R> BotDispatcher<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    pub fn new(use_case: HandleEventUseCase<S, L, R>) -> Self {
        Self {
            use_case,
            composer: ReplyComposer::new(),
        }
    }

    pub async fn dispatch(&self, event: InboundEvent) -> Result<Dispatched, HandleEventError> {
        let is_callback = event.is_callback();
        debug!(
            "Dispatching {:?} from {} ({})",
            event.token,
            event.participant,
            if is_callback { "callback" } else { "text" }
        );
        let toast = event.callback_id().map(|id| {
            debug!("Acknowledging callback {}", id);
            random_toast()
        });

        let view = self
            .use_case
            .execute(HandleEventInput::new(event.participant, event.token))
            .await?;
        let reply = self.composer.compose(&view).for_callback(is_callback);

        Ok(Dispatched { view, reply, toast })
    }

    /// Close the session store
    pub async fn shutdown(&self) -> Result<(), HandleEventError> {
        Ok(self.use_case.shutdown().await?)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Small in-memory ports for exercising the bot end to end

    use async_trait::async_trait;
    use pickflick_application::{
        HandleEventUseCase, RoomCodeGenerator, SessionStore, SlateError, SlateSource, StoreError,
    };
    use pickflick_domain::{Movie, ParticipantId, RoomCode, SessionMutation, SessionRecord, Slate};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    pub(crate) struct VecStore(Mutex<Vec<SessionRecord>>);

    #[async_trait]
    impl SessionStore for VecStore {
        async fn get(&self, participant: ParticipantId) -> Result<Option<SessionRecord>, StoreError> {
            Ok(self.0.lock().unwrap().iter().find(|r| r.participant == participant).cloned())
        }

        async fn find_by_room(&self, room: &RoomCode) -> Result<Vec<SessionRecord>, StoreError> {
            Ok(self.0.lock().unwrap().iter().filter(|r| r.is_in_room(room)).cloned().collect())
        }

        async fn upsert(&self, record: SessionRecord) -> Result<(), StoreError> {
            let mut records = self.0.lock().unwrap();
            records.retain(|r| r.participant != record.participant);
            records.push(record);
            Ok(())
        }

        async fn claim_room(&self, record: SessionRecord) -> Result<bool, StoreError> {
            let mut records = self.0.lock().unwrap();
            if let Some(room) = &record.room
                && records.iter().any(|r| r.is_in_room(room))
            {
                return Ok(false);
            }
            records.retain(|r| r.participant != record.participant);
            records.push(record);
            Ok(true)
        }

        async fn update(
            &self,
            participant: ParticipantId,
            mutation: &SessionMutation,
        ) -> Result<Option<SessionRecord>, StoreError> {
            let mut records = self.0.lock().unwrap();
            let Some(record) = records.iter_mut().find(|r| r.participant == participant) else {
                return Ok(None);
            };
            record.apply(mutation)?;
            Ok(Some(record.clone()))
        }

        async fn close(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    pub(crate) struct TenMovies;

    #[async_trait]
    impl SlateSource for TenMovies {
        async fn load_current(&self) -> Result<Slate, SlateError> {
            let movies = (1..=10)
                .map(|i| {
                    Movie::new(format!("Movie {i}"), format!("https://example.org/{i}"))
                        .with_poster(format!("https://example.org/{i}.jpg"))
                })
                .collect();
            Ok(Slate::new(movies)?)
        }
    }

    pub(crate) struct OneCode;

    impl RoomCodeGenerator for OneCode {
        fn generate(&self) -> RoomCode {
            RoomCode::new("m0v").unwrap()
        }
    }

    pub(crate) fn use_case() -> HandleEventUseCase<VecStore, TenMovies, OneCode> {
        HandleEventUseCase::new(
            Arc::new(VecStore::default()),
            Arc::new(TenMovies),
            Arc::new(OneCode),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::InboundKind;
    use crate::reply::{Delivery, TOASTS};
    use pickflick_domain::{Context, ParticipantId};

    fn text(id: i64, token: &str) -> InboundEvent {
        InboundEvent {
            participant: ParticipantId::new(id),
            token: token.to_string(),
            kind: InboundKind::Text { message_id: 1 },
        }
    }

    fn press(id: i64, token: &str) -> InboundEvent {
        InboundEvent {
            participant: ParticipantId::new(id),
            token: token.to_string(),
            kind: InboundKind::Callback {
                callback_id: "cb".to_string(),
                message_id: 2,
            },
        }
    }

    #[tokio::test]
    async fn test_text_gets_new_message_without_toast() {
        let bot = BotDispatcher::new(test_support::use_case());
        let out = bot.dispatch(text(1, "/start")).await.unwrap();
        assert_eq!(out.view.context(), Context::Start);
        assert_eq!(out.reply.delivery, Delivery::New);
        assert!(out.toast.is_none());
    }

    #[tokio::test]
    async fn test_button_press_edits_and_toasts() {
        let bot = BotDispatcher::new(test_support::use_case());
        let out = bot.dispatch(press(1, "create-room")).await.unwrap();
        assert_eq!(out.reply.delivery, Delivery::EditPrevious);
        assert!(out.reply.text.contains("m0v"));
        assert!(TOASTS.contains(&out.toast.unwrap()));
    }

    #[tokio::test]
    async fn test_voting_walks_the_slate() {
        let bot = BotDispatcher::new(test_support::use_case());
        bot.dispatch(press(1, "create-room")).await.unwrap();
        bot.dispatch(press(1, "room-found")).await.unwrap();

        let first = bot.dispatch(press(1, "start-choice")).await.unwrap();
        assert!(first.reply.text.starts_with("1. [Movie 1]"));
        // Posters go out as fresh photos
        assert_eq!(first.reply.delivery, Delivery::New);

        let second = bot.dispatch(press(1, "like-1")).await.unwrap();
        assert!(second.reply.text.starts_with("2. [Movie 2]"));
        assert_eq!(second.reply.buttons[1].value, "like-2");
    }
}
