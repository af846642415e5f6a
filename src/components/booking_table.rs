//! Bookings table shared by the student and teacher views.
//!
//! The counterpart column and the action set depend on which side of the
//! booking is looking at it. Actions call the API, toast on failure, and
//! refetch the backing resource on success.

use leptos::prelude::*;

use crate::components::toast::notify;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::{Booking, BookingStatus};
use crate::state::session::Role;
use crate::state::toast::{ToastKind, ToastState};

/// Table of bookings with role-dependent actions.
#[component]
pub fn BookingTable(
    bookings: Vec<Booking>,
    role: Role,
    resource: LocalResource<Result<Vec<Booking>, ApiError>>,
) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let counterpart_header = match role {
        Role::Teacher => "Student",
        _ => "Tutor",
    };

    let rows = bookings
        .into_iter()
        .map(|booking| {
            let counterpart = match role {
                Role::Teacher => booking.student_name.clone(),
                _ => booking.teacher_name.clone(),
            }
            .unwrap_or_else(|| "\u{2014}".to_owned());
            let status_class = format!(
                "booking-status booking-status--{}",
                booking.status.label().to_ascii_lowercase()
            );
            let price = format!("${:.2}", booking.price);
            let id = booking.id;

            let can_pay = role == Role::Student && booking.status == BookingStatus::Pending;
            let can_complete = role == Role::Teacher && booking.status == BookingStatus::Paid;
            let can_cancel = matches!(
                booking.status,
                BookingStatus::Pending | BookingStatus::Paid
            );

            let pay = {
                let api = api.clone();
                move |_| {
                    let api = api.clone();
                    leptos::task::spawn_local(async move {
                        match api.create_checkout_session(id).await {
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
                            Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
                        }
                    });
                }
            };

            let complete = {
                let api = api.clone();
                move |_| {
                    let api = api.clone();
                    leptos::task::spawn_local(async move {
                        match api.complete_booking(id).await {
                            Ok(_) => {
                                notify(toasts, ToastKind::Success, "Session marked complete");
                                resource.refetch();
                            }
                            Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
                        }
                    });
                }
            };

            let cancel = {
                let api = api.clone();
                move |_| {
                    let api = api.clone();
                    leptos::task::spawn_local(async move {
                        let outcome = match role {
                            Role::Teacher => api.teacher_cancel_booking(id).await,
                            _ => api.cancel_booking(id).await,
                        };
                        match outcome {
                            Ok(()) => {
                                notify(toasts, ToastKind::Info, "Booking cancelled");
                                resource.refetch();
                            }
                            Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
                        }
                    });
                }
            };

            view! {
                <tr class="booking-table__row">
                    <td>{counterpart}</td>
                    <td>{booking.start_time.clone()}</td>
                    <td>{booking.end_time.clone()}</td>
                    <td>{price}</td>
                    <td>
                        <span class=status_class>{booking.status.label()}</span>
                    </td>
                    <td class="booking-table__actions">
                        {can_pay
                            .then(|| {
                                view! {
                                    <button class="btn btn--primary" on:click=pay.clone()>
                                        "Pay"
                                    </button>
                                }
                            })}
                        {can_complete
                            .then(|| {
                                view! {
                                    <button class="btn btn--primary" on:click=complete.clone()>
                                        "Complete"
                                    </button>
                                }
                            })}
                        {can_cancel
                            .then(|| {
                                view! {
                                    <button class="btn" on:click=cancel.clone()>
                                        "Cancel"
                                    </button>
                                }
                            })}
                    </td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <table class="booking-table">
            <thead>
                <tr>
                    <th>{counterpart_header}</th>
                    <th>"Starts"</th>
                    <th>"Ends"</th>
                    <th>"Price"</th>
                    <th>"Status"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
