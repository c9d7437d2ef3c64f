//! Chat log and the Idle -> AwaitingReply -> Idle gate.

use std::rc::Rc;

use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// Milliseconds since the epoch.
    pub timestamp: f64,
}

/// Identifies one outstanding request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingReply(Ticket),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
    phase: Phase,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Idle,
            next_id: 1,
        }
    }

    pub fn with_greeting(text: &str, at: f64) -> Self {
        let mut c = Self::new();
        if !text.trim().is_empty() {
            c.push(Sender::Assistant, text.to_string(), at);
        }
        c
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.phase, Phase::AwaitingReply(_))
    }

    /// Ticket the next accepted `submit` will return.
    pub fn next_ticket(&self) -> Ticket {
        Ticket(self.next_id)
    }

    /// Whether `submit(text, ..)` would be accepted.
    pub fn accepts(&self, text: &str) -> bool {
        !self.is_awaiting() && !text.trim().is_empty()
    }

    fn push(&mut self, sender: Sender, text: String, at: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            text,
            timestamp: at,
        });
        id
    }

    /// Appends the user's message and starts waiting. No-op while a reply is pending.
    pub fn submit(&mut self, text: &str, at: f64) -> Option<Ticket> {
        if !self.accepts(text) {
            return None;
        }
        let id = self.push(Sender::User, text.trim().to_string(), at);
        let ticket = Ticket(id);
        self.phase = Phase::AwaitingReply(ticket);
        Some(ticket)
    }

    /// Appends the reply for the outstanding ticket. Anything else is ignored.
    pub fn resolve(&mut self, ticket: Ticket, text: String, at: f64) -> bool {
        if self.phase != Phase::AwaitingReply(ticket) {
            return false;
        }
        self.push(Sender::Assistant, text, at);
        self.phase = Phase::Idle;
        true
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

pub enum ChatAction {
    Submit { text: String, at: f64 },
    Resolve { ticket: Ticket, text: String, at: f64 },
}

impl Reducible for Conversation {
    type Action = ChatAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        let changed = match action {
            ChatAction::Submit { text, at } => new.submit(&text, at).is_some(),
            ChatAction::Resolve { ticket, text, at } => new.resolve(ticket, text, at),
        };
        if changed { Rc::new(new) } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_seeds_one_assistant_message() {
        let c = Conversation::with_greeting("Hi, I'm LYRA", 0.0);
        assert_eq!(c.messages().len(), 1);
        assert_eq!(c.messages()[0].sender, Sender::Assistant);
        assert!(Conversation::with_greeting("  ", 0.0).messages().is_empty());
    }

    #[test]
    fn submit_then_resolve_appends_in_order() {
        let mut c = Conversation::new();
        let t = c.submit("hello", 1.0).unwrap();
        assert!(c.is_awaiting());
        assert!(c.resolve(t, "hi!".into(), 2.0));
        assert!(!c.is_awaiting());
        let senders: Vec<Sender> = c.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Assistant]);
    }

    #[test]
    fn second_submit_while_pending_is_noop() {
        let mut c = Conversation::new();
        let t = c.submit("first", 1.0).unwrap();
        assert!(c.submit("second", 1.5).is_none());
        assert_eq!(c.messages().len(), 1);
        c.resolve(t, "reply".into(), 2.0);
        assert_eq!(c.messages().len(), 2);
        assert!(c.submit("second", 3.0).is_some());
    }

    #[test]
    fn next_ticket_predicts_submit() {
        let mut c = Conversation::with_greeting("hey", 0.0);
        let predicted = c.next_ticket();
        assert_eq!(c.submit("q", 1.0), Some(predicted));
        assert!(c.resolve(predicted, "a".into(), 2.0));
    }

    #[test]
    fn blank_submit_is_rejected() {
        let mut c = Conversation::new();
        assert!(c.submit("   ", 0.0).is_none());
        assert!(!c.is_awaiting());
    }

    #[test]
    fn duplicate_or_stale_resolution_is_ignored() {
        let mut c = Conversation::new();
        let t1 = c.submit("one", 0.0).unwrap();
        assert!(c.resolve(t1, "a".into(), 1.0));
        assert!(!c.resolve(t1, "again".into(), 1.1));
        let t2 = c.submit("two", 2.0).unwrap();
        assert!(!c.resolve(t1, "late".into(), 2.1));
        assert!(c.resolve(t2, "b".into(), 3.0));
        assert_eq!(c.messages().len(), 4);
    }

    #[test]
    fn reducer_keeps_same_rc_on_rejected_action() {
        let state = Rc::new(Conversation::new());
        let next = state.clone().reduce(ChatAction::Submit {
            text: "q".into(),
            at: 0.0,
        });
        assert_eq!(next.messages().len(), 1);
        let same = next.clone().reduce(ChatAction::Submit {
            text: "again".into(),
            at: 0.1,
        });
        assert!(Rc::ptr_eq(&next, &same));
    }
}
