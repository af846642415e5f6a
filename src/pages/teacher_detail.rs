//! Tutor detail page: profile, open availability, and book-and-pay.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::toast::notify;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::{AvailabilitySlot, NewBooking, TeacherProfile};
use crate::state::guard;
use crate::state::session::Role;
use crate::state::toast::{ToastKind, ToastState};

/// Tutor detail page. Booking a slot creates the booking, opens a checkout
/// session, and hard-redirects to the payment provider.
#[component]
pub fn TeacherDetailPage() -> impl IntoView {
    guard::enforce(&[Role::Student]);

    let api = expect_context::<ApiClient>();
    let params = use_params_map();
    let teacher_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
    };

    let teacher = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let id = teacher_id();
            async move {
                match id {
                    Some(id) => api.fetch_teacher(id).await,
                    None => Err(ApiError::Decode("missing tutor id in route".to_owned())),
                }
            }
        }
    });

    let slots = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let id = teacher_id();
            async move {
                match id {
                    Some(id) => api.fetch_teacher_availability(id).await,
                    None => Err(ApiError::Decode("missing tutor id in route".to_owned())),
                }
            }
        }
    });

    view! {
        <div class="teacher-detail-page">
            <Suspense fallback=move || view! { <p>"Loading tutor..."</p> }>
                {move || {
                    teacher
                        .get()
                        .map(|result| match result {
                            Ok(profile) => view! { <TeacherSummary profile=profile/> }.into_any(),
                            Err(e) => {
                                view! { <p class="error-text">{e.to_string()}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>

            <h2>"Available sessions"</h2>
            <Suspense fallback=move || view! { <p>"Loading availability..."</p> }>
                {move || {
                    slots
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                if list.is_empty() {
                                    view! { <p>"This tutor has no open slots."</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="slot-list">
                                            {list
                                                .into_iter()
                                                .map(|slot| view! { <SlotRow slot_data=slot/> })
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

/// Header block with the tutor's name, subjects, rate, and bio.
#[component]
fn TeacherSummary(profile: TeacherProfile) -> impl IntoView {
    let subjects = if profile.subjects.is_empty() {
        "No subjects listed".to_owned()
    } else {
        profile.subjects.join(", ")
    };
    let rate = format!("${:.2}/hr", profile.hourly_rate);

    view! {
        <header class="teacher-detail-page__header">
            <h1>{profile.name}</h1>
            <p class="teacher-detail-page__subjects">{subjects}</p>
            <p class="teacher-detail-page__rate">{rate}</p>
            {profile.bio.map(|bio| view! { <p class="teacher-detail-page__bio">{bio}</p> })}
        </header>
    }
}

/// One availability slot with its book action.
#[component]
fn SlotRow(slot_data: AvailabilitySlot) -> impl IntoView {
    let slot = slot_data;
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let booking_in_progress = RwSignal::new(false);

    let slot_id = slot.id;
    let slot_teacher_id = slot.teacher_id;
    let bookable = !slot.booked;

    let on_book = move |_| {
        let api = api.clone();
        booking_in_progress.set(true);
        leptos::task::spawn_local(async move {
            let request = NewBooking {
                teacher_id: slot_teacher_id,
                slot_id,
            };
            let outcome = async {
                let booking = api.create_booking(&request).await?;
                api.create_checkout_session(booking.id).await
            }
            .await;
            match outcome {
                Ok(checkout) => {
                    #[cfg(feature = "hydrate")]
                    {
                        if let Some(w) = web_sys::window() {
                            let _ = w.location().set_href(&checkout.url);
                        }
                    }
                    #[cfg(not(feature = "hydrate"))]
                    {
                        let _ = checkout;
                    }
                }
                Err(e) => {
                    notify(toasts, ToastKind::Error, e.to_string());
                    booking_in_progress.set(false);
                }
            }
        });
    };

    view! {
        <li class="slot-list__row">
            <span class="slot-list__time">{slot.start_time.clone()} " \u{2192} " {slot.end_time.clone()}</span>
            {if bookable {
                view! {
                    <button
                        class="btn btn--primary"
                        prop:disabled=move || booking_in_progress.get()
                        on:click=on_book
                    >
                        {move || if booking_in_progress.get() { "Booking..." } else { "Book" }}
                    </button>
                }
                    .into_any()
            } else {
                view! { <span class="slot-list__taken">"Taken"</span> }.into_any()
            }}
        </li>
    }
}
