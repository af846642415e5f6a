//! Checkout return pages.
//!
//! The payment provider redirects back here with a `bookingId` query
//! parameter; each page confirms the outcome with the server so the booking
//! moves to its final state even if the provider's webhook is delayed.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::net::http::{ApiClient, ApiError};
use crate::state::guard;
use crate::state::session::Role;

fn booking_id_from_query(raw: Option<String>) -> Option<i64> {
    raw.and_then(|v| v.parse::<i64>().ok())
}

/// Successful checkout return.
#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    guard::enforce(&[Role::Student]);

    let api = expect_context::<ApiClient>();
    let query = use_query_map();

    let confirmation = LocalResource::new(move || {
        let api = api.clone();
        let booking_id = booking_id_from_query(query.read().get("bookingId"));
        async move {
            match booking_id {
                Some(id) => api.confirm_payment_success(id).await.map(|()| id),
                None => Err(ApiError::Decode("missing bookingId".to_owned())),
            }
        }
    });

    view! {
        <div class="payment-result-page">
            <Suspense fallback=move || view! { <p>"Confirming your payment..."</p> }>
                {move || {
                    confirmation
                        .get()
                        .map(|result| match result {
                            Ok(id) => {
                                view! {
                                    <div class="payment-result-page__body">
                                        <h1>"Payment received"</h1>
                                        <p>{format!("Booking #{id} is confirmed.")}</p>
                                        <a href="/student/bookings" class="btn btn--primary">
                                            "View my bookings"
                                        </a>
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(e) => {
                                view! {
                                    <div class="payment-result-page__body">
                                        <h1>"Something went wrong"</h1>
                                        <p class="error-text">{e.to_string()}</p>
                                        <a href="/student/bookings" class="btn">
                                            "View my bookings"
                                        </a>
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Abandoned checkout return.
#[component]
pub fn PaymentCancelPage() -> impl IntoView {
    guard::enforce(&[Role::Student]);

    let api = expect_context::<ApiClient>();
    let query = use_query_map();

    let confirmation = LocalResource::new(move || {
        let api = api.clone();
        let booking_id = booking_id_from_query(query.read().get("bookingId"));
        async move {
            match booking_id {
                Some(id) => api.confirm_payment_cancel(id).await.map(|()| id),
                None => Err(ApiError::Decode("missing bookingId".to_owned())),
            }
        }
    });

    view! {
        <div class="payment-result-page">
            <Suspense fallback=move || view! { <p>"One moment..."</p> }>
                {move || {
                    confirmation
                        .get()
                        .map(|result| match result {
                            Ok(id) => {
                                view! {
                                    <div class="payment-result-page__body">
                                        <h1>"Checkout cancelled"</h1>
                                        <p>{format!("Booking #{id} was not paid; the slot has been released.")}</p>
                                        <a href="/student" class="btn">
                                            "Keep browsing"
                                        </a>
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(e) => {
                                view! {
                                    <div class="payment-result-page__body">
                                        <h1>"Checkout cancelled"</h1>
                                        <p class="error-text">{e.to_string()}</p>
                                        <a href="/student" class="btn">
                                            "Keep browsing"
                                        </a>
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
