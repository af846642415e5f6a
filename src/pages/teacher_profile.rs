//! Teacher profile page with an editable form.

use leptos::prelude::*;

use crate::components::toast::notify;
use crate::net::http::ApiClient;
use crate::net::types::{Profile, TeacherProfile};
use crate::state::guard;
use crate::state::session::{Role, SessionContext};
use crate::state::toast::{ToastKind, ToastState};

#[component]
pub fn TeacherProfilePage() -> impl IntoView {
    guard::enforce(&[Role::Teacher]);

    let api = expect_context::<ApiClient>();
    let me = LocalResource::new(move || {
        let api = api.clone();
        async move { api.fetch_teacher_me().await }
    });

    view! {
        <div class="profile-page">
            <h1>"My profile"</h1>
            <Suspense fallback=move || view! { <p>"Loading profile..."</p> }>
                {move || {
                    me.get()
                        .map(|result| match result {
                            Ok(profile) => {
                                view! { <TeacherProfileForm profile=profile/> }.into_any()
                            }
                            Err(e) => {
                                view! { <p class="error-text">{e.to_string()}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn TeacherProfileForm(profile: TeacherProfile) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let id = profile.id;
    let name = RwSignal::new(profile.name.clone());
    let email = RwSignal::new(profile.email.clone());
    let bio = RwSignal::new(profile.bio.clone().unwrap_or_default());
    let subjects = RwSignal::new(profile.subjects.join(", "));
    let rate = RwSignal::new(format!("{:.2}", profile.hourly_rate));
    let saving = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name_value = name.get_untracked();
        let email_value = email.get_untracked();
        if name_value.trim().is_empty() || email_value.trim().is_empty() {
            notify(toasts, ToastKind::Error, "Name and email are required");
            return;
        }
        let Ok(rate_value) = rate.get_untracked().trim().parse::<f64>() else {
            notify(toasts, ToastKind::Error, "Hourly rate must be a number");
            return;
        };

        let updated = TeacherProfile {
            id,
            name: name_value.trim().to_owned(),
            email: email_value.trim().to_owned(),
            bio: {
                let raw = bio.get_untracked();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            },
            subjects: subjects
                .get_untracked()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            hourly_rate: rate_value,
        };

        let api = api.clone();
        let session = session.clone();
        saving.set(true);
        leptos::task::spawn_local(async move {
            match api.update_teacher_me(&updated).await {
                Ok(saved) => {
                    session.set_profile(Profile::Teacher(saved));
                    notify(toasts, ToastKind::Success, "Profile saved");
                }
                Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
            }
            saving.set(false);
        });
    };

    view! {
        <form class="profile-form" on:submit=on_submit>
            <label class="profile-form__label">
                "Name"
                <input
                    class="profile-form__input"
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </label>
            <label class="profile-form__label">
                "Email"
                <input
                    class="profile-form__input"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label class="profile-form__label">
                "About me"
                <textarea
                    class="profile-form__input"
                    prop:value=move || bio.get()
                    on:input=move |ev| bio.set(event_target_value(&ev))
                ></textarea>
            </label>
            <label class="profile-form__label">
                "Subjects (comma-separated)"
                <input
                    class="profile-form__input"
                    type="text"
                    prop:value=move || subjects.get()
                    on:input=move |ev| subjects.set(event_target_value(&ev))
                />
            </label>
            <label class="profile-form__label">
                "Hourly rate (USD)"
                <input
                    class="profile-form__input"
                    type="number"
                    prop:value=move || rate.get()
                    on:input=move |ev| rate.set(event_target_value(&ev))
                />
            </label>
            <button class="btn btn--primary" type="submit" prop:disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Save" }}
            </button>
        </form>
    }
}
