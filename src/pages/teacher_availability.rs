//! Teacher availability management: list open slots, add new ones.

use leptos::prelude::*;

use crate::components::toast::notify;
use crate::net::http::ApiClient;
use crate::net::types::NewSlot;
use crate::state::guard;
use crate::state::session::{Role, SessionContext};
use crate::state::toast::{ToastKind, ToastState};

#[component]
pub fn TeacherAvailabilityPage() -> impl IntoView {
    guard::enforce(&[Role::Teacher]);

    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let cached_id = {
        let session = session.clone();
        move || {
            session
                .state
                .get()
                .session
                .and_then(|s| s.profile.map(|p| p.id()))
        }
    };

    let slots = LocalResource::new({
        let api = api.clone();
        let cached_id = cached_id.clone();
        move || {
            let api = api.clone();
            let cached = cached_id();
            async move {
                let id = match cached {
                    Some(id) => id,
                    None => api.fetch_teacher_me().await?.id,
                };
                api.fetch_own_availability(id).await
            }
        }
    });

    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let adding = RwSignal::new(false);

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let start_value = start.get_untracked();
        let end_value = end.get_untracked();
        if start_value.is_empty() || end_value.is_empty() {
            notify(toasts, ToastKind::Error, "Both start and end times are required");
            return;
        }

        let api = api.clone();
        let cached = cached_id();
        adding.set(true);
        leptos::task::spawn_local(async move {
            let outcome = async {
                let id = match cached {
                    Some(id) => id,
                    None => api.fetch_teacher_me().await?.id,
                };
                api.add_availability_slot(
                    id,
                    &NewSlot {
                        start_time: start_value,
                        end_time: end_value,
                    },
                )
                .await
            }
            .await;
            match outcome {
                Ok(_) => {
                    notify(toasts, ToastKind::Success, "Slot added");
                    start.set(String::new());
                    end.set(String::new());
                    slots.refetch();
                }
                Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
            }
            adding.set(false);
        });
    };

    view! {
        <div class="availability-page">
            <h1>"Availability"</h1>

            <form class="availability-form" on:submit=on_add>
                <label class="availability-form__label">
                    "From"
                    <input
                        class="availability-form__input"
                        type="datetime-local"
                        prop:value=move || start.get()
                        on:input=move |ev| start.set(event_target_value(&ev))
                    />
                </label>
                <label class="availability-form__label">
                    "To"
                    <input
                        class="availability-form__input"
                        type="datetime-local"
                        prop:value=move || end.get()
                        on:input=move |ev| end.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" prop:disabled=move || adding.get()>
                    {move || if adding.get() { "Adding..." } else { "Add slot" }}
                </button>
            </form>

            <Suspense fallback=move || view! { <p>"Loading slots..."</p> }>
                {move || {
                    slots
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                if list.is_empty() {
                                    view! { <p>"No slots published yet."</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="slot-list">
                                            {list
                                                .into_iter()
                                                .map(|slot| {
                                                    let badge = if slot.booked { "Booked" } else { "Open" };
                                                    let badge_class = if slot.booked {
                                                        "slot-list__badge slot-list__badge--booked"
                                                    } else {
                                                        "slot-list__badge slot-list__badge--open"
                                                    };
                                                    view! {
                                                        <li class="slot-list__row">
                                                            <span class="slot-list__time">
                                                                {slot.start_time.clone()} " \u{2192} "
                                                                {slot.end_time.clone()}
                                                            </span>
                                                            <span class=badge_class>{badge}</span>
                                                        </li>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </ul>
                                    }
                                        .into_any()
                                }
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
