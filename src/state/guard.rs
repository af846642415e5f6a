//! Route guard: decides whether a navigation target may render.
//!
//! `decide` is a pure function over the in-memory session state — it never
//! touches the persisted store. Side effects (the actual redirects) live in
//! [`enforce`], which protected pages call at mount.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{Role, Session, SessionContext};

/// Outcome of an authorization check, computed per navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// Storage has not been read yet; render nothing.
    Undecided,
    Allow,
    RedirectLogin,
    RedirectForbidden,
}

/// Authorize a route against the current session.
///
/// An empty `required_roles` means any signed-in user may enter. Membership
/// is exact; case was already normalized when the role was parsed.
pub fn decide(
    session: Option<&Session>,
    loading: bool,
    required_roles: &[Role],
) -> AuthorizationDecision {
    if loading {
        return AuthorizationDecision::Undecided;
    }
    let Some(session) = session else {
        return AuthorizationDecision::RedirectLogin;
    };
    if !required_roles.is_empty() && !required_roles.contains(&session.role) {
        return AuthorizationDecision::RedirectForbidden;
    }
    AuthorizationDecision::Allow
}

/// Redirect away from a protected page when the session does not satisfy it.
///
/// Re-evaluates whenever the session changes, so a logout while the page is
/// open also navigates away.
pub fn enforce(required_roles: &'static [Role]) {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();
    Effect::new(move || {
        let state = session.state.get();
        match decide(state.session.as_ref(), state.loading, required_roles) {
            AuthorizationDecision::RedirectLogin => {
                navigate("/", NavigateOptions::default());
            }
            AuthorizationDecision::RedirectForbidden => {
                navigate("/not-authorized", NavigateOptions::default());
            }
            AuthorizationDecision::Undecided | AuthorizationDecision::Allow => {}
        }
    });
}
