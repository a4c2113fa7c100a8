use std::fmt;

/// Handle returned by [`Writable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// An observable box.
///
/// A subscriber is called with the current value as soon as it subscribes,
/// then once after every `set`, `update` or `modify`.
pub struct Writable<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn subscribe(&mut self, mut subscriber: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        subscriber(&self.value);
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Replaces the value with `updater(&current)`.
    pub fn update(&mut self, updater: impl FnOnce(&T) -> T) {
        let next = updater(&self.value);
        self.set(next);
    }

    /// Edits the value in place, then notifies.
    pub fn modify<R>(&mut self, editor: impl FnOnce(&mut T) -> R) -> R {
        let result = editor(&mut self.value);
        self.notify();
        result
    }

    fn notify(&mut self) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.value);
        }
    }
}

impl<T: Default> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Forwards the observable surface of a store to its inner [`Writable`].
macro_rules! observable {
    ($store:ty, $state:ty) => {
        impl $store {
            pub fn subscribe(
                &mut self,
                subscriber: impl FnMut(&$state) + 'static,
            ) -> $crate::store::SubscriptionId {
                self.state.subscribe(subscriber)
            }

            pub fn unsubscribe(&mut self, id: $crate::store::SubscriptionId) -> bool {
                self.state.unsubscribe(id)
            }

            pub fn get(&self) -> &$state {
                self.state.get()
            }

            pub fn set(&mut self, state: $state) {
                self.state.set(state);
            }

            pub fn update(&mut self, updater: impl FnOnce(&$state) -> $state) {
                self.state.update(updater);
            }
        }
    };
}

pub(crate) use observable;
