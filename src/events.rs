//! Named, parameterless game signals with an ordered listener registry.

use std::sync::{Arc, Mutex, MutexGuard};

/// Signals raised by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// The last ship of the interactive placement queue was committed.
    ShipsPlaced,
    /// A ship on either side sank.
    ShipSunk,
    /// A winner (or a draw) was declared.
    MatchOver,
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(GameEvent, ListenerId, Listener)>,
}

/// Observer registry shared between the engine and its collaborators.
///
/// Cloning yields another handle to the same registry. Listeners run in
/// registration order over a snapshot, so a listener may unsubscribe itself
/// (or others) while the event is being delivered.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // listeners never run under the lock, so a poisoned registry is still consistent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `listener` for `event`.
    pub fn subscribe<F>(&self, event: GameEvent, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut reg = self.registry();
        let id = ListenerId(reg.next_id);
        reg.next_id += 1;
        reg.listeners.push((event, id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut reg = self.registry();
        let before = reg.listeners.len();
        reg.listeners.retain(|(_, lid, _)| *lid != id);
        reg.listeners.len() != before
    }

    pub fn listener_count(&self, event: GameEvent) -> usize {
        self.registry()
            .listeners
            .iter()
            .filter(|(e, _, _)| *e == event)
            .count()
    }

    /// Notify every listener of `event`. A raise with no listeners is a no-op.
    pub fn raise(&self, event: GameEvent) {
        let snapshot: Vec<(ListenerId, Listener)> = self
            .registry()
            .listeners
            .iter()
            .filter(|(e, _, _)| *e == event)
            .map(|(_, id, l)| (*id, Arc::clone(l)))
            .collect();
        log::trace!("raise {:?} to {} listener(s)", event, snapshot.len());
        for (id, listener) in snapshot {
            // skip listeners removed by an earlier callback in this round
            let still_registered = self
                .registry()
                .listeners
                .iter()
                .any(|(_, lid, _)| *lid == id);
            if still_registered {
                listener();
            }
        }
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let reg = self.registry();
        f.debug_struct("EventBus")
            .field("listeners", &reg.listeners.len())
            .finish()
    }
}
