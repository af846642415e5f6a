//! Forbidden landing page.

use leptos::prelude::*;

/// Shown when a signed-in user reaches a route their role does not permit.
#[component]
pub fn NotAuthorizedPage() -> impl IntoView {
    view! {
        <div class="not-authorized-page">
            <h1>"Not authorized"</h1>
            <p>"Your account does not have access to that page."</p>
            <a href="/" class="btn">
                "Back to start"
            </a>
        </div>
    }
}
