//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::toast::ToastHost;
use crate::net::http::ApiClient;
use crate::pages::admin::AdminPage;
use crate::pages::home::HomePage;
use crate::pages::not_authorized::NotAuthorizedPage;
use crate::pages::payment_result::{PaymentCancelPage, PaymentSuccessPage};
use crate::pages::register::RegisterPage;
use crate::pages::student_bookings::StudentBookingsPage;
use crate::pages::student_home::StudentHomePage;
use crate::pages::student_payments::StudentPaymentsPage;
use crate::pages::student_profile::StudentProfilePage;
use crate::pages::teacher_availability::TeacherAvailabilityPage;
use crate::pages::teacher_detail::TeacherDetailPage;
use crate::pages::teacher_home::TeacherHomePage;
use crate::pages::teacher_payments::TeacherPaymentsPage;
use crate::pages::teacher_profile::TeacherProfilePage;
use crate::state::session::SessionContext;
use crate::state::toast::ToastState;
use crate::storage::SessionStore;
use crate::util::theme;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(feature = "hydrate")]
fn platform_store() -> Arc<dyn SessionStore> {
    Arc::new(crate::storage::LocalStore)
}

#[cfg(not(feature = "hydrate"))]
fn platform_store() -> Arc<dyn SessionStore> {
    Arc::new(crate::storage::MemoryStore::default())
}

/// Root application component.
///
/// Provides the session, API client, toast, and theme contexts, hydrates the
/// persisted session once on the client, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = platform_store();
    let session = SessionContext::new(Arc::clone(&store));
    let api = ApiClient::from_environment(store);
    let toasts = RwSignal::new(ToastState::default());
    let dark = RwSignal::new(false);

    provide_context(session.clone());
    provide_context(api);
    provide_context(toasts);
    provide_context(dark);

    // Hydrate session and theme once. Effects only run in the browser, so
    // server-rendered output stays in the "authorization undecided" state and
    // never flashes protected content.
    {
        let session = session.clone();
        Effect::new(move || {
            if session.state.get_untracked().loading {
                session.hydrate();
            }
            let prefers_dark = theme::read_preference();
            theme::apply(prefers_dark);
            dark.set(prefers_dark);
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/tutorlink.css"/>
        <Title text="TutorLink"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("student") view=StudentHomePage/>
                    <Route
                        path=(StaticSegment("student"), StaticSegment("teachers"), ParamSegment("id"))
                        view=TeacherDetailPage
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("bookings"))
                        view=StudentBookingsPage
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("payments"))
                        view=StudentPaymentsPage
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("profile"))
                        view=StudentProfilePage
                    />
                    <Route path=StaticSegment("teacher") view=TeacherHomePage/>
                    <Route
                        path=(StaticSegment("teacher"), StaticSegment("availability"))
                        view=TeacherAvailabilityPage
                    />
                    <Route
                        path=(StaticSegment("teacher"), StaticSegment("payments"))
                        view=TeacherPaymentsPage
                    />
                    <Route
                        path=(StaticSegment("teacher"), StaticSegment("profile"))
                        view=TeacherProfilePage
                    />
                    <Route path=StaticSegment("admin") view=AdminPage/>
                    <Route path=StaticSegment("not-authorized") view=NotAuthorizedPage/>
                    <Route
                        path=(StaticSegment("payment"), StaticSegment("success"))
                        view=PaymentSuccessPage
                    />
                    <Route
                        path=(StaticSegment("payment"), StaticSegment("cancel"))
                        view=PaymentCancelPage
                    />
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
