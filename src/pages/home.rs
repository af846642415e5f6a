//! Landing page with the sign-in form.
//!
//! This is the application's login entry point: unrecoverable auth failures
//! land here, and signed-in visitors are forwarded to their role's home.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast::notify;
use crate::net::http::ApiClient;
use crate::net::types::Profile;
use crate::state::session::{Role, SessionContext};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::token;

/// Landing page — hero copy plus the sign-in form.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    // Forward signed-in visitors to their role home. Also fires right after
    // a successful login publishes the new session.
    {
        let session = session.clone();
        let navigate = use_navigate();
        Effect::new(move || {
            let state = session.state.get();
            if !state.loading {
                if let Some(s) = &state.session {
                    navigate(s.role.home_path(), NavigateOptions::default());
                }
            }
        });
    }

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let on_submit = {
        let session = session.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let email_value = email.get_untracked();
            let password_value = password.get_untracked();
            if email_value.trim().is_empty() || password_value.is_empty() {
                notify(toasts, ToastKind::Error, "Email and password are required");
                return;
            }

            let api = api.clone();
            let session = session.clone();
            submitting.set(true);
            leptos::task::spawn_local(async move {
                match api.login(email_value.trim(), &password_value).await {
                    Ok(credentials) => match token::role_from_token(&credentials.access_token) {
                        Some(role) => {
                            session.login(&credentials, role, None);
                            // Cache the profile for the navbar and forms; a
                            // failure here degrades display, not the session.
                            let profile = match role {
                                Role::Student => {
                                    api.fetch_student_me().await.ok().map(Profile::Student)
                                }
                                Role::Teacher => {
                                    api.fetch_teacher_me().await.ok().map(Profile::Teacher)
                                }
                                Role::Admin => None,
                            };
                            if let Some(profile) = profile {
                                session.set_profile(profile);
                            }
                        }
                        None => {
                            notify(
                                toasts,
                                ToastKind::Error,
                                "Sign-in returned an unusable token",
                            );
                        }
                    },
                    Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
                }
                submitting.set(false);
            });
        }
    };

    view! {
        <div class="home-page">
            <section class="home-page__hero">
                <h1>"TutorLink"</h1>
                <p>"Find a tutor, book a session, learn anything."</p>
            </section>

            <form class="login-form" on:submit=on_submit>
                <h2>"Sign in"</h2>
                <label class="login-form__label">
                    "Email"
                    <input
                        class="login-form__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-form__label">
                    "Password"
                    <input
                        class="login-form__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" prop:disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="login-form__hint">
                    "New here? " <a href="/register">"Create an account"</a>
                </p>
            </form>
        </div>
    }
}
