//! Admin roster overview.

use leptos::prelude::*;

use crate::net::http::ApiClient;
use crate::state::guard;
use crate::state::session::Role;

/// Read-only roster of tutors for administrators.
#[component]
pub fn AdminPage() -> impl IntoView {
    guard::enforce(&[Role::Admin]);

    let api = expect_context::<ApiClient>();
    let teachers = LocalResource::new(move || {
        let api = api.clone();
        async move { api.fetch_teachers().await }
    });

    view! {
        <div class="admin-page">
            <h1>"Tutor roster"</h1>
            <Suspense fallback=move || view! { <p>"Loading roster..."</p> }>
                {move || {
                    teachers
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                view! {
                                    <table class="admin-page__table">
                                        <thead>
                                            <tr>
                                                <th>"Name"</th>
                                                <th>"Email"</th>
                                                <th>"Subjects"</th>
                                                <th>"Rate"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|t| {
                                                    view! {
                                                        <tr>
                                                            <td>{t.name}</td>
                                                            <td>{t.email}</td>
                                                            <td>{t.subjects.join(", ")}</td>
                                                            <td>{format!("${:.2}/hr", t.hourly_rate)}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
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
