// src/state/chat.rs
use tracing::{debug, warn};
use uuid::Uuid;

pub const THINKING_PLACEHOLDER: &str = "thinking";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(Uuid);

impl TurnId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub id: TurnId,
    pub role: Role,
    pub text: String,
    pub pending: bool,
}

/// A submitted question waiting for its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub turn: TurnId,
    pub question: String,
}

/// Ordered transcript. Turns are only ever appended, except that each bot
/// placeholder is replaced in place, once, by its own answer.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn pending_count(&self) -> usize {
        self.turns.iter().filter(|turn| turn.pending).count()
    }

    pub fn submit(&mut self, question: &str) -> Option<PendingReply> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.turns.push(ChatTurn {
            id: TurnId::new(),
            role: Role::User,
            text: question.to_string(),
            pending: false,
        });

        let placeholder = TurnId::new();
        self.turns.push(ChatTurn {
            id: placeholder,
            role: Role::Bot,
            text: THINKING_PLACEHOLDER.to_string(),
            pending: true,
        });
        debug!(pending = self.pending_count(), "chat question submitted");

        Some(PendingReply {
            turn: placeholder,
            question: question.to_string(),
        })
    }

    pub fn resolve(&mut self, turn: TurnId, answer: String) -> bool {
        match self.turns.iter_mut().find(|t| t.id == turn && t.pending) {
            Some(placeholder) => {
                placeholder.text = answer;
                placeholder.pending = false;
                true
            }
            None => {
                warn!(?turn, "dropping answer for a turn that is no longer pending");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(session: &ChatSession) -> Vec<(Role, &str)> {
        session.turns().iter().map(|t| (t.role, t.text.as_str())).collect()
    }

    #[test]
    fn test_submit_appends_question_and_placeholder() {
        let mut session = ChatSession::default();
        let pending = session.submit("How did Wipro perform?").unwrap();

        assert_eq!(pending.question, "How did Wipro perform?");
        assert_eq!(
            texts(&session),
            vec![(Role::User, "How did Wipro perform?"), (Role::Bot, THINKING_PLACEHOLDER)]
        );
        assert_eq!(session.pending_count(), 1);

        assert!(session.resolve(pending.turn, "Revenue grew 4%.".into()));
        assert_eq!(session.turns()[1].text, "Revenue grew 4%.");
        assert_eq!(session.pending_count(), 0);
    }

    #[test]
    fn test_blank_question_is_rejected() {
        let mut session = ChatSession::default();
        assert!(session.submit("   \n").is_none());
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_sequential_submits_produce_pairs() {
        let mut session = ChatSession::default();
        for n in 0..3 {
            let pending = session.submit(&format!("question {n}")).unwrap();
            assert!(session.pending_count() <= 1);
            session.resolve(pending.turn, format!("answer {n}"));
        }

        assert_eq!(session.turns().len(), 6);
        assert!(session
            .turns()
            .chunks(2)
            .all(|pair| pair[0].role == Role::User && pair[1].role == Role::Bot));
    }

    #[test]
    fn test_out_of_order_answers_land_on_their_own_placeholder() {
        let mut session = ChatSession::default();
        let first = session.submit("first").unwrap();
        let second = session.submit("second").unwrap();
        assert_eq!(session.pending_count(), 2);

        session.resolve(second.turn, "answer to second".into());
        session.resolve(first.turn, "answer to first".into());

        assert_eq!(
            texts(&session),
            vec![
                (Role::User, "first"),
                (Role::Bot, "answer to first"),
                (Role::User, "second"),
                (Role::Bot, "answer to second"),
            ]
        );
    }

    #[test]
    fn test_placeholder_is_replaced_only_once() {
        let mut session = ChatSession::default();
        let pending = session.submit("first").unwrap();
        assert!(session.resolve(pending.turn, "one".into()));
        assert!(!session.resolve(pending.turn, "two".into()));
        assert_eq!(session.turns()[1].text, "one");
    }

    #[test]
    fn test_answers_after_clear_are_dropped() {
        let mut session = ChatSession::default();
        let pending = session.submit("first").unwrap();
        session.clear();
        assert!(!session.resolve(pending.turn, "late".into()));
        assert!(session.turns().is_empty());
    }
}
