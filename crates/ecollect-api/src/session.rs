// Session gate
//
// Process-wide authentication state: one cell, two states, exactly three
// transitions. Every other component reads through the gate; nothing else
// may write the token. The AdminClient is the only caller of
// `force_logout`, and only in reaction to a backend token rejection.

use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

const EVENT_CHANNEL_SIZE: usize = 16;

/// Whether an operator session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Session lifecycle notifications.
///
/// `ForcedLogout` is the navigation trigger: the consuming surface routes
/// back to the login entry point when it sees one. Operator-initiated
/// logout emits `LoggedOut` instead so surfaces can distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
    ForcedLogout,
}

/// Persistence seam for the session token.
///
/// The token outlives the process (the browser-localStorage analog); the
/// store decides where it lives. Failures to persist are logged but never
/// block a transition -- the in-memory state is authoritative for the
/// lifetime of the process.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<SecretString>;
    /// Persist the token.
    fn save(&self, token: &SecretString) -> std::io::Result<()>;
    /// Remove the persisted token.
    fn clear(&self) -> std::io::Result<()>;
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    /// A store pre-seeded with a token (simulates a persisted session).
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<SecretString> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn save(&self, token: &SecretString) -> std::io::Result<()> {
        *self.token.write().expect("token lock poisoned") = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        *self.token.write().expect("token lock poisoned") = None;
        Ok(())
    }
}

struct GateInner {
    token: RwLock<Option<SecretString>>,
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    store: Box<dyn TokenStore>,
}

/// The process-wide session state machine.
///
/// Cheaply cloneable; all clones share the same cell. Initial state is
/// [`Authenticated`](SessionState::Authenticated) iff the store held a
/// persisted token at construction.
#[derive(Clone)]
pub struct SessionGate {
    inner: Arc<GateInner>,
}

impl SessionGate {
    /// Create a gate backed by the given token store.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let token = store.load();
        let initial = if token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        debug!(state = ?initial, "session gate initialized");

        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);

        Self {
            inner: Arc::new(GateInner {
                token: RwLock::new(token),
                state,
                events,
                store: Box::new(store),
            }),
        }
    }

    /// Gate with no persistence -- the session dies with the process.
    pub fn ephemeral() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// `Anonymous -> Authenticated`. Stores and persists the token.
    pub fn login(&self, token: SecretString) {
        if let Err(e) = self.inner.store.save(&token) {
            warn!(error = %e, "failed to persist session token");
        }
        *self.inner.token.write().expect("token lock poisoned") = Some(token);
        let _ = self.inner.state.send(SessionState::Authenticated);
        let _ = self.inner.events.send(SessionEvent::LoggedIn);
        debug!("session established");
    }

    /// `Authenticated -> Anonymous`, operator-initiated. Clears the token.
    pub fn logout(&self) {
        self.clear_token();
        let _ = self.inner.state.send(SessionState::Anonymous);
        let _ = self.inner.events.send(SessionEvent::LoggedOut);
        debug!("session ended");
    }

    /// `Authenticated -> Anonymous`, fired by the transport layer when the
    /// backend rejects the token. Emits [`SessionEvent::ForcedLogout`] so
    /// the surface can route back to login. Idempotent: a no-op when
    /// already `Anonymous`.
    pub fn force_logout(&self) {
        if self.state() == SessionState::Anonymous {
            debug!("force_logout with no active session (ignored)");
            return;
        }
        self.clear_token();
        let _ = self.inner.state.send(SessionState::Anonymous);
        let _ = self.inner.events.send(SessionEvent::ForcedLogout);
        warn!("session token rejected by backend -- forced logout");
    }

    fn clear_token(&self) {
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "failed to clear persisted session token");
        }
        *self.inner.token.write().expect("token lock poisoned") = None;
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current state. Pure; performs no network call.
    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    /// View-entry guard check.
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The bearer token for outbound requests, if a session is active.
    pub fn bearer_token(&self) -> Option<SecretString> {
        self.inner.token.read().expect("token lock poisoned").clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Subscribe to lifecycle events (login, logout, forced logout).
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }
}
