use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, warn};

use crate::domains::chat::{ChatMessage, MessageIds, Role};
use crate::error::Result;
use crate::flows::fsm::{interaction_transition, InteractionAction, InteractionState};
use crate::flows::{IgnoreReason, Submission};
use crate::interfaces::advisory::AdvisoryEngine;

struct Conversation {
    state: InteractionState,
    messages: Vec<ChatMessage>,
    ids: MessageIds,
    generation: u64,
}

impl Conversation {
    fn new() -> Self {
        Self {
            state: InteractionState::Idle,
            messages: vec![ChatMessage::welcome()],
            ids: MessageIds::default(),
            generation: 0,
        }
    }

    fn push(&mut self, role: Role, content: String) {
        let timestamp = Utc::now();
        let id = self.ids.next(timestamp);
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp,
        });
    }

    fn apply(&mut self, action: InteractionAction) -> bool {
        match interaction_transition(self.state, action) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}

/// The assistant conversation. At most one query is pending at a time.
pub struct ChatFlow {
    engine: Arc<dyn AdvisoryEngine>,
    conversation: Mutex<Conversation>,
}

/// Returns the flow to `Idle` if the pending submit is dropped or fails.
struct PendingQuery<'a> {
    conversation: &'a Mutex<Conversation>,
    generation: u64,
    settled: bool,
}

impl Drop for PendingQuery<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut conversation = lock(self.conversation);
        if conversation.generation == self.generation && conversation.state.is_pending() {
            conversation.apply(InteractionAction::Reset);
            debug!("pending chat query abandoned");
        }
    }
}

fn lock(conversation: &Mutex<Conversation>) -> MutexGuard<'_, Conversation> {
    match conversation.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl ChatFlow {
    pub fn new(engine: Arc<dyn AdvisoryEngine>) -> Self {
        Self {
            engine,
            conversation: Mutex::new(Conversation::new()),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.conversation).messages.clone()
    }

    pub fn state(&self) -> InteractionState {
        lock(&self.conversation).state
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_pending()
    }

    /// Appends `input` as a user message, awaits the advisory reply and
    /// appends it. Blank input and input arriving while a reply is pending
    /// are ignored without touching the conversation.
    pub async fn submit(&self, input: &str) -> Result<Submission> {
        if input.trim().is_empty() {
            return Ok(Submission::Ignored(IgnoreReason::EmptyInput));
        }

        let generation = {
            let mut conversation = lock(&self.conversation);
            if !conversation.apply(InteractionAction::Submit) {
                return Ok(Submission::Ignored(IgnoreReason::Busy));
            }
            conversation.push(Role::User, input.to_string());
            conversation.generation
        };
        let mut pending = PendingQuery {
            conversation: &self.conversation,
            generation,
            settled: false,
        };

        let reply = match self.engine.respond_to_query(input).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("advisory engine failed: {err}");
                return Err(err);
            }
        };

        let mut conversation = lock(&self.conversation);
        pending.settled = true;
        if conversation.generation != generation {
            return Ok(Submission::Ignored(IgnoreReason::Discarded));
        }
        conversation.push(Role::Assistant, reply);
        conversation.apply(InteractionAction::Resolve);
        Ok(Submission::Accepted)
    }

    /// Starts a fresh conversation; a reply still in flight is dropped.
    pub fn reset(&self) {
        let mut conversation = lock(&self.conversation);
        let generation = conversation.generation + 1;
        *conversation = Conversation::new();
        conversation.generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::random::SequenceRandom;
    use crate::services::advisory::{MockAdvisoryEngine, DISEASE_ADVICE};

    fn flow() -> ChatFlow {
        let engine = MockAdvisoryEngine::without_latency(Arc::new(SequenceRandom::new(vec![0])));
        ChatFlow::new(Arc::new(engine))
    }

    #[tokio::test]
    async fn starts_with_welcome_message() {
        let flow = flow();
        let messages = flow.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "welcome");
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(flow.state(), InteractionState::Idle);
    }

    #[tokio::test]
    async fn whitespace_is_not_a_message() {
        let flow = flow();
        let outcome = flow.submit("   \n").await.unwrap();
        assert_eq!(outcome, Submission::Ignored(IgnoreReason::EmptyInput));
        assert_eq!(flow.messages().len(), 1);
    }

    #[tokio::test]
    async fn reply_follows_question() {
        let flow = flow();
        assert!(flow.submit("Pests on my cotton").await.unwrap().is_accepted());
        let messages = flow.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Pests on my cotton");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, DISEASE_ADVICE);
        assert_eq!(flow.state(), InteractionState::Resolved);
    }

    #[tokio::test]
    async fn reset_restores_welcome_only() {
        let flow = flow();
        flow.submit("water").await.unwrap();
        flow.reset();
        assert_eq!(flow.messages().len(), 1);
        assert_eq!(flow.state(), InteractionState::Idle);
    }
}
