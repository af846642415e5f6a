use super::*;
use crate::state::session::{Role, Session};
use crate::util::token;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

fn session(role: Role) -> Session {
    Session {
        token: "tok".to_owned(),
        role,
        profile: None,
    }
}

// =============================================================
// decide
// =============================================================

#[test]
fn loading_is_always_undecided() {
    let s = session(Role::Admin);
    assert_eq!(
        decide(Some(&s), true, &[Role::Admin]),
        AuthorizationDecision::Undecided
    );
    assert_eq!(decide(None, true, &[]), AuthorizationDecision::Undecided);
    assert_eq!(
        decide(None, true, &[Role::Student]),
        AuthorizationDecision::Undecided
    );
}

#[test]
fn absent_session_redirects_to_login() {
    assert_eq!(decide(None, false, &[]), AuthorizationDecision::RedirectLogin);
    assert_eq!(
        decide(None, false, &[Role::Teacher]),
        AuthorizationDecision::RedirectLogin
    );
    assert_eq!(
        decide(None, false, &[Role::Student, Role::Teacher, Role::Admin]),
        AuthorizationDecision::RedirectLogin
    );
}

#[test]
fn wrong_role_is_forbidden() {
    let s = session(Role::Student);
    assert_eq!(
        decide(Some(&s), false, &[Role::Teacher]),
        AuthorizationDecision::RedirectForbidden
    );
    assert_eq!(
        decide(Some(&s), false, &[Role::Teacher, Role::Admin]),
        AuthorizationDecision::RedirectForbidden
    );
}

#[test]
fn matching_role_is_allowed() {
    let s = session(Role::Teacher);
    assert_eq!(
        decide(Some(&s), false, &[Role::Teacher]),
        AuthorizationDecision::Allow
    );
    assert_eq!(
        decide(Some(&s), false, &[Role::Student, Role::Teacher]),
        AuthorizationDecision::Allow
    );
}

#[test]
fn empty_requirement_admits_any_signed_in_user() {
    for role in [Role::Student, Role::Teacher, Role::Admin] {
        assert_eq!(
            decide(Some(&session(role)), false, &[]),
            AuthorizationDecision::Allow
        );
    }
}

// =============================================================
// End-to-end role scenario: lowercase claim, uppercase requirement
// =============================================================

#[test]
fn teacher_token_authorizes_teacher_routes_but_not_admin() {
    // Token payload carries the role claim in lowercase, as issued.
    let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"42","role":"teacher"}"#);
    let raw_token = format!("header.{payload}.signature");

    let role = token::role_from_token(&raw_token).expect("role claim decodes");
    let s = Session {
        token: raw_token,
        role,
        profile: None,
    };

    assert_eq!(
        decide(Some(&s), false, &[Role::Teacher]),
        AuthorizationDecision::Allow
    );
    assert_eq!(
        decide(Some(&s), false, &[Role::Admin]),
        AuthorizationDecision::RedirectForbidden
    );
}
