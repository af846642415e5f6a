//! Toast host and notification helper.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

/// Push a notification and schedule its dismissal.
///
/// The timer only exists in the browser; under SSR the entry simply stays in
/// state (server-rendered HTML is replaced on hydration anyway).
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    let mut id = 0;
    toasts.update(|t| id = t.push(kind, message));
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(std::time::Duration::from_secs(4)).await;
            toasts.update(|t| t.dismiss(id));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

/// Renders the toast stack in a fixed corner overlay.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let class = match toast.kind {
                            ToastKind::Info => "toast toast--info",
                            ToastKind::Success => "toast toast--success",
                            ToastKind::Error => "toast toast--error",
                        };
                        let id = toast.id;
                        view! {
                            <div class=class on:click=move |_| toasts.update(|t| t.dismiss(id))>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
