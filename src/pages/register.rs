//! Account registration page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast::notify;
use crate::net::http::ApiClient;
use crate::net::types::RegisterRequest;
use crate::state::session::Role;
use crate::state::toast::{ToastKind, ToastState};

/// Registration form for students and tutors.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let submitting = RwSignal::new(false);
    let registered = RwSignal::new(false);

    // Land on the sign-in page once the account exists.
    {
        let navigate = use_navigate();
        Effect::new(move || {
            if registered.get() {
                navigate("/", NavigateOptions::default());
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name_value = name.get_untracked();
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if name_value.trim().is_empty()
            || email_value.trim().is_empty()
            || password_value.is_empty()
        {
            notify(toasts, ToastKind::Error, "Name, email, and password are required");
            return;
        }

        let api = api.clone();
        let request = RegisterRequest {
            name: name_value.trim().to_owned(),
            email: email_value.trim().to_owned(),
            password: password_value,
            role: role.get_untracked().as_str().to_owned(),
        };
        submitting.set(true);
        leptos::task::spawn_local(async move {
            match api.register(&request).await {
                Ok(()) => {
                    notify(toasts, ToastKind::Success, "Account created, sign in to continue");
                    registered.set(true);
                }
                Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="register-page">
            <form class="register-form" on:submit=on_submit>
                <h2>"Create your account"</h2>
                <label class="register-form__label">
                    "Name"
                    <input
                        class="register-form__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="register-form__label">
                    "Email"
                    <input
                        class="register-form__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="register-form__label">
                    "Password"
                    <input
                        class="register-form__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="register-form__label">
                    "I want to"
                    <select
                        class="register-form__input"
                        on:change=move |ev| {
                            let choice = event_target_value(&ev);
                            role.set(Role::parse(&choice).unwrap_or(Role::Student));
                        }
                    >
                        <option value="STUDENT" selected=move || role.get() == Role::Student>
                            "Learn with a tutor"
                        </option>
                        <option value="TEACHER" selected=move || role.get() == Role::Teacher>
                            "Teach students"
                        </option>
                    </select>
                </label>
                <button class="btn btn--primary" type="submit" prop:disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating..." } else { "Create account" }}
                </button>
            </form>
        </div>
    }
}
