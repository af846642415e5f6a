//! Teacher dashboard: earnings and session stats plus the bookings table.

use leptos::prelude::*;

use crate::components::booking_table::BookingTable;
use crate::net::http::ApiClient;
use crate::net::types::TeacherStats;
use crate::state::guard;
use crate::state::session::{Role, SessionContext};

/// Resolve the signed-in teacher's id: cached profile first, server second.
async fn own_teacher_id(api: &ApiClient, cached: Option<i64>) -> Result<i64, crate::net::http::ApiError> {
    match cached {
        Some(id) => Ok(id),
        None => Ok(api.fetch_teacher_me().await?.id),
    }
}

#[component]
pub fn TeacherHomePage() -> impl IntoView {
    guard::enforce(&[Role::Teacher]);

    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();

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

    let stats = LocalResource::new({
        let api = api.clone();
        let cached_id = cached_id.clone();
        move || {
            let api = api.clone();
            let cached = cached_id();
            async move {
                let id = own_teacher_id(&api, cached).await?;
                api.fetch_teacher_stats(id).await
            }
        }
    });

    let bookings = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let cached = cached_id();
            async move {
                let id = own_teacher_id(&api, cached).await?;
                api.fetch_teacher_bookings(id).await
            }
        }
    });

    view! {
        <div class="dashboard-page">
            <h1>"Dashboard"</h1>

            <Suspense fallback=move || view! { <p>"Loading stats..."</p> }>
                {move || {
                    stats
                        .get()
                        .map(|result| match result {
                            Ok(stats) => view! { <StatCards stats=stats/> }.into_any(),
                            Err(e) => {
                                view! { <p class="error-text">{e.to_string()}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>

            <h2>"Bookings"</h2>
            <Suspense fallback=move || view! { <p>"Loading bookings..."</p> }>
                {move || {
                    bookings
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                if list.is_empty() {
                                    view! { <p>"No bookings yet."</p> }.into_any()
                                } else {
                                    view! {
                                        <BookingTable
                                            bookings=list
                                            role=Role::Teacher
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

/// The four headline numbers at the top of the dashboard.
#[component]
fn StatCards(stats: TeacherStats) -> impl IntoView {
    view! {
        <div class="stat-cards">
            <div class="stat-cards__card">
                <span class="stat-cards__value">{format!("${:.2}", stats.total_earnings)}</span>
                <span class="stat-cards__label">"Total earnings"</span>
            </div>
            <div class="stat-cards__card">
                <span class="stat-cards__value">{stats.completed_sessions}</span>
                <span class="stat-cards__label">"Completed sessions"</span>
            </div>
            <div class="stat-cards__card">
                <span class="stat-cards__value">{stats.upcoming_sessions}</span>
                <span class="stat-cards__label">"Upcoming sessions"</span>
            </div>
            <div class="stat-cards__card">
                <span class="stat-cards__value">{stats.unique_students}</span>
                <span class="stat-cards__label">"Students"</span>
            </div>
        </div>
    }
}
