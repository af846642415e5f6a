//! Teacher payment history page (checkout provider ledger).

use leptos::prelude::*;

use crate::components::payment_table::PaymentTable;
use crate::net::http::ApiClient;
use crate::state::guard;
use crate::state::session::{Role, SessionContext};

#[component]
pub fn TeacherPaymentsPage() -> impl IntoView {
    guard::enforce(&[Role::Teacher]);

    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();

    let payments = LocalResource::new(move || {
        let api = api.clone();
        let cached = session
            .state
            .get()
            .session
            .and_then(|s| s.profile.map(|p| p.id()));
        async move {
            let id = match cached {
                Some(id) => id,
                None => api.fetch_teacher_me().await?.id,
            };
            api.fetch_teacher_payments(id).await
        }
    });

    view! {
        <div class="payments-page">
            <h1>"Payments"</h1>
            <Suspense fallback=move || view! { <p>"Loading payments..."</p> }>
                {move || {
                    payments
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                if list.is_empty() {
                                    view! { <p>"No payments yet."</p> }.into_any()
                                } else {
                                    view! { <PaymentTable payments=list/> }.into_any()
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
