//! Route guard component wrapped around every protected page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each protected route mounts its own `Protected`, so the session is
//! evaluated exactly once per navigation, when the component is built. A
//! denial clears the store, publishes one notice through the session signal,
//! and redirects; only an admitted view starts the expiry watch.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionView;
use crate::util::guard::{Admission, admit, browser_guard, install_expiry_watch, redirect_options};

/// Render `children` only while the session is live.
#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let navigate = use_navigate();

    let admission = untrack(|| admit(&mut browser_guard(session)));

    match admission {
        Admission::Render => {
            install_expiry_watch(session, navigate);
            view! { <div class="protected">{children()}</div> }.into_any()
        }
        Admission::Redirect(target) => {
            // No tracked inputs: runs once, after the route is built.
            Effect::new(move || navigate(&target, redirect_options()));
            view! { <p class="protected__checking">"Redirecting to sign in..."</p> }.into_any()
        }
    }
}
