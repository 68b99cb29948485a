//! Dismissible banner for the notice published by the last session denial.

use leptos::prelude::*;

use crate::state::session::SessionView;

#[component]
pub fn SessionNotice() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let notice = move || session.get().notice;

    view! {
        <Show when=move || notice().is_some()>
            <div class="session-notice" role="alert">
                <span class="session-notice__text">{move || notice().unwrap_or_default()}</span>
                <button
                    class="session-notice__dismiss"
                    title="Dismiss"
                    on:click=move |_| session.update(SessionView::dismiss_notice)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
