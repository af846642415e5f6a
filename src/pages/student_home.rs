//! Student browse page — the tutor marketplace grid.

use leptos::prelude::*;

use crate::components::teacher_card::TeacherCard;
use crate::net::http::ApiClient;
use crate::state::guard;
use crate::state::session::Role;

/// Tutor browse grid, the student's home.
#[component]
pub fn StudentHomePage() -> impl IntoView {
    guard::enforce(&[Role::Student]);

    let api = expect_context::<ApiClient>();
    let teachers = LocalResource::new(move || {
        let api = api.clone();
        async move { api.fetch_teachers().await }
    });

    view! {
        <div class="browse-page">
            <header class="browse-page__header">
                <h1>"Find your tutor"</h1>
            </header>

            <Suspense fallback=move || view! { <p>"Loading tutors..."</p> }>
                {move || {
                    teachers
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                if list.is_empty() {
                                    view! { <p>"No tutors are available yet."</p> }.into_any()
                                } else {
                                    view! {
                                        <div class="browse-page__grid">
                                            {list
                                                .into_iter()
                                                .map(|teacher| view! { <TeacherCard teacher=teacher/> })
                                                .collect::<Vec<_>>()}
                                        </div>
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
