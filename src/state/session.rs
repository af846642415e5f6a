//! Session state: the current user's token, role, and profile.
//!
//! DESIGN
//! ======
//! The pure operations (`hydrate`, `login`, `logout`) work against an
//! injected [`SessionStore`] and return the next state, so they run natively
//! under test. [`SessionContext`] wraps them in one `RwSignal` provided via
//! context; it is the only session representation other components read
//! reactively. The store itself is read directly only by the HTTP client.
//!
//! A token with a missing (or undecodable) role is invalid: it never becomes
//! a `Session`, and no protected route is authorized from it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::types::Profile;
use crate::storage::{self, SessionStore, keys};

/// Marketplace roles. Parsing normalizes case, so a `"teacher"` claim and a
/// `"TEACHER"` route requirement agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "STUDENT" => Some(Role::Student),
            "TEACHER" => Some(Role::Teacher),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
        }
    }

    /// Landing route for a freshly signed-in user of this role.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Student => "/student",
            Role::Teacher => "/teacher",
            Role::Admin => "/admin",
        }
    }
}

/// The unified credential pair. The refresh token is long-lived and optional;
/// without one, the first 401 ends the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// The current authenticated user, held in memory for the page's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub profile: Option<Profile>,
}

/// Session plus the hydration flag.
///
/// `loading == true` means "authorization undecided": consumers suspend
/// rendering decisions until hydration has read the store, which prevents a
/// flash of unauthorized content.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl SessionState {
    /// Read the persisted session once. Publishes a session only when both
    /// token and role are present; always ends with `loading = false`.
    pub fn hydrate(store: &dyn SessionStore) -> Self {
        let token = store.get(keys::ACCESS_TOKEN);
        let role = read_role(store);
        let session = match (token, role) {
            (Some(token), Some(role)) => Some(Session {
                token,
                role,
                profile: storage::get_json(store, keys::PROFILE),
            }),
            _ => None,
        };
        Self {
            session,
            loading: false,
        }
    }

    /// Persist the new credentials and publish the session. Navigation is the
    /// caller's responsibility.
    pub fn login(
        store: &dyn SessionStore,
        credentials: &Credentials,
        role: Role,
        profile: Option<Profile>,
    ) -> Self {
        store.set(keys::ACCESS_TOKEN, &credentials.access_token);
        match &credentials.refresh_token {
            Some(refresh) => store.set(keys::REFRESH_TOKEN, refresh),
            None => store.remove(keys::REFRESH_TOKEN),
        }
        store.set(keys::ROLE, role.as_str());
        match &profile {
            Some(profile) => storage::set_json(store, keys::PROFILE, profile),
            None => store.remove(keys::PROFILE),
        }
        Self {
            session: Some(Session {
                token: credentials.access_token.clone(),
                role,
                profile,
            }),
            loading: false,
        }
    }

    /// Remove every session key and publish "no session". Callable at any
    /// time; requests already in flight that later 401 find an empty store
    /// and no-op through the no-refresh-token path.
    pub fn logout(store: &dyn SessionStore) -> Self {
        storage::clear_session(store);
        Self {
            session: None,
            loading: false,
        }
    }

    /// Replace the cached profile, persisting it alongside the session.
    pub fn with_profile(mut self, store: &dyn SessionStore, profile: Profile) -> Self {
        if let Some(session) = self.session.as_mut() {
            storage::set_json(store, keys::PROFILE, &profile);
            session.profile = Some(profile);
        }
        self
    }
}

/// Read the stored role, evicting a value that no longer parses.
fn read_role(store: &dyn SessionStore) -> Option<Role> {
    let raw = store.get(keys::ROLE)?;
    match Role::parse(&raw) {
        Some(role) => Some(role),
        None => {
            store.remove(keys::ROLE);
            None
        }
    }
}

/// Reactive session provided to the view tree.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            state: RwSignal::new(SessionState::default()),
        }
    }

    /// Runs once at provider mount, on the client only.
    pub fn hydrate(&self) {
        self.state.set(SessionState::hydrate(&*self.store));
    }

    pub fn login(&self, credentials: &Credentials, role: Role, profile: Option<Profile>) {
        self.state
            .set(SessionState::login(&*self.store, credentials, role, profile));
    }

    /// Cache a profile fetched after login.
    pub fn set_profile(&self, profile: Profile) {
        let next = self.state.get_untracked().with_profile(&*self.store, profile);
        self.state.set(next);
    }

    /// Clear the session and return to the application root.
    pub fn logout(&self) {
        self.state.set(SessionState::logout(&*self.store));
        #[cfg(feature = "hydrate")]
        {
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href("/");
            }
        }
    }
}
