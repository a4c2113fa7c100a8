use super::writable::Writable;
use crate::clock::{Clock, SystemClock};
use crate::id;
use serde::Serialize;

pub const ERROR_DURATION_MS: i64 = 4000;
pub const WARNING_DURATION_MS: i64 = 3000;
pub const INFO_DURATION_MS: i64 = 3000;
pub const SUCCESS_DURATION_MS: i64 = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
    Warning,
    Info,
    Success,
}

impl ToastKind {
    pub fn default_duration_ms(self) -> i64 {
        match self {
            ToastKind::Error => ERROR_DURATION_MS,
            ToastKind::Warning => WARNING_DURATION_MS,
            ToastKind::Info => INFO_DURATION_MS,
            ToastKind::Success => SUCCESS_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: i64,
    /// Epoch milliseconds at which the toast was shown.
    pub created_at: i64,
}

impl ToastMessage {
    pub fn expires_at(&self) -> i64 {
        self.created_at + self.duration_ms
    }
}

/// Transient notifications.
///
/// Toasts expire `duration_ms` after they were shown, but nothing removes
/// them on its own. The owner must call [`ToastStore::expire_due`] from its
/// event loop, and can use [`ToastStore::next_expiry`] to arm a timer for the
/// next due toast.
pub struct ToastStore<C: Clock = SystemClock> {
    state: Writable<Vec<ToastMessage>>,
    clock: C,
}

impl ToastStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ToastStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ToastStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Writable::new(Vec::new()),
            clock,
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Vec<ToastMessage>) + 'static) -> super::SubscriptionId {
        self.state.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: super::SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn toasts(&self) -> &[ToastMessage] {
        self.state.get()
    }

    /// Shows a toast and returns its id. `duration_ms` defaults to the info
    /// duration.
    pub fn show(&mut self, message: &str, kind: ToastKind, duration_ms: Option<i64>) -> String {
        let toast = ToastMessage {
            id: id::toast(),
            kind,
            message: message.to_string(),
            duration_ms: duration_ms.unwrap_or(INFO_DURATION_MS),
            created_at: self.clock.now_millis(),
        };
        let id = toast.id.clone();
        log::debug!("Showing {:?} toast '{}' for {} ms", kind, id, toast.duration_ms);
        self.state.modify(|toasts| toasts.push(toast));
        id
    }

    pub fn dismiss(&mut self, id: &str) {
        self.state.modify(|toasts| toasts.retain(|toast| toast.id != id));
    }

    pub fn clear(&mut self) {
        self.state.set(Vec::new());
    }

    pub fn error(&mut self, message: &str, duration_ms: Option<i64>) -> String {
        self.show_kind(message, ToastKind::Error, duration_ms)
    }

    pub fn warning(&mut self, message: &str, duration_ms: Option<i64>) -> String {
        self.show_kind(message, ToastKind::Warning, duration_ms)
    }

    pub fn info(&mut self, message: &str, duration_ms: Option<i64>) -> String {
        self.show_kind(message, ToastKind::Info, duration_ms)
    }

    pub fn success(&mut self, message: &str, duration_ms: Option<i64>) -> String {
        self.show_kind(message, ToastKind::Success, duration_ms)
    }

    fn show_kind(&mut self, message: &str, kind: ToastKind, duration_ms: Option<i64>) -> String {
        self.show(message, kind, Some(duration_ms.unwrap_or(kind.default_duration_ms())))
    }

    /// Removes every toast whose duration has elapsed and returns how many
    /// were removed. Subscribers are only notified when something expired.
    pub fn expire_due(&mut self) -> usize {
        let now = self.clock.now_millis();
        let due = self
            .state
            .get()
            .iter()
            .filter(|toast| toast.expires_at() <= now)
            .count();
        if due > 0 {
            self.state.modify(|toasts| toasts.retain(|toast| toast.expires_at() > now));
        }
        due
    }

    /// Epoch milliseconds of the next expiry, for scheduling a timer.
    pub fn next_expiry(&self) -> Option<i64> {
        self.state.get().iter().map(ToastMessage::expires_at).min()
    }
}
