//! LYRA, the portfolio assistant: canned rules first, then a remote model,
//! then a local fallback. Callers always get a non-empty reply.

pub mod completion;
pub mod conversation;
pub mod credentials;
pub mod fallback;
pub mod rules;

use std::cell::RefCell;

pub use completion::{ChatCompletionClient, CompletionBackend};
pub use conversation::{ChatAction, Conversation, Sender};
pub use credentials::{BrowserStorage, Credential, CredentialStore, KeyValueStore};
pub use fallback::LocalFallback;
pub use rules::{Answer, RuleSet};

use crate::board::RandomSource;
use crate::util::cwarn;

pub struct Assistant<B: CompletionBackend, S: KeyValueStore> {
    rules: RuleSet,
    local: LocalFallback,
    backend: B,
    credentials: CredentialStore<S>,
    rng: RefCell<Box<dyn RandomSource>>,
}

impl<B: CompletionBackend, S: KeyValueStore> Assistant<B, S> {
    pub fn new(
        rules: RuleSet,
        local: LocalFallback,
        backend: B,
        credentials: CredentialStore<S>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            rules,
            local,
            backend,
            credentials,
            rng: RefCell::new(rng),
        }
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    pub fn answer(&self, text: &str) -> Answer {
        self.rules.answer(text)
    }

    fn local_reply(&self, text: &str) -> String {
        let mut rng = self.rng.borrow_mut();
        self.local.reply(text, &mut **rng)
    }

    /// Only reached when no rule matched. Makes at most one remote call.
    pub async fn fallback(&self, text: &str) -> String {
        let key = match self.credentials.get() {
            Credential::Configured(key) => key,
            Credential::Unconfigured => return self.local_reply(text),
        };
        match self.backend.complete(&key, text).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => self.local_reply(text),
            Err(e) => {
                cwarn(&format!("assistant fallback: {e:#}"));
                self.local_reply(text)
            }
        }
    }

    pub async fn respond(&self, text: &str) -> String {
        match self.answer(text) {
            Answer::Canned(reply) => reply,
            Answer::Fallback => self.fallback(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::credentials::MemoryStore;
    use super::fallback::GENERIC_REPLIES;
    use super::rules::PROJECTS_REPLY;
    use super::*;
    use crate::board::rng::SeededRandom;
    use anyhow::{anyhow, Result};
    use std::cell::Cell;

    struct FakeBackend {
        calls: Cell<u32>,
        reply: Option<&'static str>,
    }

    impl FakeBackend {
        fn ok(reply: &'static str) -> Self {
            Self {
                calls: Cell::new(0),
                reply: Some(reply),
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                reply: None,
            }
        }
    }

    impl CompletionBackend for FakeBackend {
        async fn complete(&self, _api_key: &str, _text: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            self.reply
                .map(str::to_string)
                .ok_or_else(|| anyhow!("simulated network error"))
        }
    }

    fn assistant(backend: FakeBackend, key: Option<&str>) -> Assistant<FakeBackend, MemoryStore> {
        let creds = CredentialStore::new(MemoryStore::default());
        if let Some(k) = key {
            creds.set(k);
        }
        Assistant::new(
            RuleSet::default(),
            LocalFallback::default(),
            backend,
            creds,
            Box::new(SeededRandom::new(77)),
        )
    }

    #[tokio::test]
    async fn canned_rule_skips_fallback() {
        let a = assistant(FakeBackend::ok("remote"), Some("sk-1"));
        assert_eq!(a.respond("What projects have you built?").await, PROJECTS_REPLY);
        assert_eq!(a.backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn no_credential_uses_generic_reply_without_network() {
        let a = assistant(FakeBackend::ok("remote"), None);
        let reply = a.respond("asdkjasd").await;
        assert!(!reply.is_empty());
        assert!(GENERIC_REPLIES.contains(&reply.as_str()));
        assert_eq!(a.backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn configured_credential_calls_backend_once() {
        let a = assistant(FakeBackend::ok("A remote answer"), Some("sk-1"));
        assert_eq!(a.respond("asdkjasd").await, "A remote answer");
        assert_eq!(a.backend.calls.get(), 1);
    }

    #[tokio::test]
    async fn backend_failure_falls_back_without_retry() {
        let a = assistant(FakeBackend::failing(), Some("sk-1"));
        let reply = a.respond("asdkjasd").await;
        assert!(GENERIC_REPLIES.contains(&reply.as_str()));
        assert_eq!(a.backend.calls.get(), 1);
    }

    #[tokio::test]
    async fn blank_remote_reply_is_replaced() {
        let a = assistant(FakeBackend::ok("   "), Some("sk-1"));
        assert!(!a.respond("qwerty").await.trim().is_empty());
    }

    #[tokio::test]
    async fn failed_call_adds_exactly_one_reply_to_log() {
        let a = assistant(FakeBackend::failing(), Some("sk-1"));
        let mut log = Conversation::new();
        let ticket = log.submit("asdkjasd", 0.0).unwrap();
        // a second submission while pending changes nothing
        assert!(log.submit("again", 0.5).is_none());
        assert_eq!(log.messages().len(), 1);

        let reply = a.respond("asdkjasd").await;
        assert!(log.resolve(ticket, reply, 1.0));
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[1].sender, Sender::Assistant);
        assert_eq!(a.backend.calls.get(), 1);
    }

    #[tokio::test]
    async fn clearing_credential_returns_to_local_mode() {
        let a = assistant(FakeBackend::ok("remote"), Some("sk-1"));
        a.credentials().clear();
        a.respond("asdkjasd").await;
        assert_eq!(a.backend.calls.get(), 0);
    }
}
