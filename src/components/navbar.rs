//! Top navigation bar: role-aware links, theme toggle, and logout.

use leptos::prelude::*;

use crate::state::session::{Role, SessionContext};
use crate::util::theme;

/// Navigation bar shown on every page.
///
/// Links depend on the signed-in role; anonymous visitors get the login and
/// register entries. The theme toggle persists its preference independently
/// of the session.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let dark = expect_context::<RwSignal<bool>>();

    let role = {
        let session = session.clone();
        move || session.state.get().session.map(|s| s.role)
    };

    let links = move || -> Vec<(&'static str, &'static str)> {
        match role() {
            None => vec![("/", "Sign in"), ("/register", "Register")],
            Some(Role::Student) => vec![
                ("/student", "Find tutors"),
                ("/student/bookings", "My bookings"),
                ("/student/payments", "Payments"),
                ("/student/profile", "Profile"),
            ],
            Some(Role::Teacher) => vec![
                ("/teacher", "Dashboard"),
                ("/teacher/availability", "Availability"),
                ("/teacher/payments", "Payments"),
                ("/teacher/profile", "Profile"),
            ],
            Some(Role::Admin) => vec![("/admin", "Admin")],
        }
    };

    let display_name = {
        let session = session.clone();
        move || {
            session
                .state
                .get()
                .session
                .and_then(|s| s.profile.map(|p| p.name().to_owned()))
        }
    };

    let signed_in = {
        let session = session.clone();
        move || session.state.get().session.is_some()
    };

    let on_toggle_theme = move |_| {
        let next = theme::toggle(dark.get_untracked());
        dark.set(next);
    };

    let on_logout = move |_| session.logout();

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">
                "TutorLink"
            </a>
            <div class="navbar__links">
                {move || {
                    links()
                        .into_iter()
                        .map(|(href, label)| {
                            view! {
                                <a href=href class="navbar__link">
                                    {label}
                                </a>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
            <span class="navbar__spacer"></span>
            <button class="navbar__theme" on:click=on_toggle_theme title="Toggle theme">
                {move || if dark.get() { "\u{2600}" } else { "\u{263e}" }}
            </button>
            {move || display_name().map(|name| view! { <span class="navbar__user">{name}</span> })}
            <Show when=signed_in.clone()>
                <button class="navbar__logout" on:click=on_logout.clone()>
                    "Log out"
                </button>
            </Show>
        </nav>
    }
}
