//! Student bookings page.

use leptos::prelude::*;

use crate::components::booking_table::BookingTable;
use crate::net::http::ApiClient;
use crate::state::guard;
use crate::state::session::{Role, SessionContext};

/// The student's bookings, with pay and cancel actions.
#[component]
pub fn StudentBookingsPage() -> impl IntoView {
    guard::enforce(&[Role::Student]);

    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();

    let bookings = LocalResource::new(move || {
        let api = api.clone();
        // Use the cached profile id when present; otherwise ask the server.
        let cached = session
            .state
            .get()
            .session
            .and_then(|s| s.profile.map(|p| p.id()));
        async move {
            let id = match cached {
                Some(id) => id,
                None => api.fetch_student_me().await?.id,
            };
            api.fetch_student_bookings(id).await
        }
    });

    view! {
        <div class="bookings-page">
            <h1>"My bookings"</h1>
            <Suspense fallback=move || view! { <p>"Loading bookings..."</p> }>
                {move || {
                    bookings
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                if list.is_empty() {
                                    view! { <p>"You have no bookings yet."</p> }.into_any()
                                } else {
                                    view! {
                                        <BookingTable
                                            bookings=list
                                            role=Role::Student
                                            resource=bookings
                                        />
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
