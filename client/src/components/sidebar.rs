//! Navigation menu with logout entry and session countdown.
//!
//! Entries are disabled while no session is live or while the auth page is
//! shown; the countdown is fed by the expiry watch through the session signal.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};
use session::config::DEFAULT_AUTH_PATH;

use crate::state::session::SessionView;
use crate::util::guard::browser_guard;

/// One navigable menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
}

pub(crate) const MENU: &[MenuEntry] = &[
    MenuEntry {
        path: "/",
        label: "Chat",
    },
    MenuEntry {
        path: "/pantry",
        label: "Pantry",
    },
    MenuEntry {
        path: "/preferences",
        label: "Preferences",
    },
    MenuEntry {
        path: "/favorites",
        label: "Favorites",
    },
    MenuEntry {
        path: "/profile",
        label: "My profile",
    },
];

/// Whether menu entries (and the logout entry) may be used.
pub(crate) fn entries_enabled(active: bool, pathname: &str) -> bool {
    active && pathname != DEFAULT_AUTH_PATH
}

/// Whether `entry_path` is the page at `pathname`; `/chat` aliases `/`.
pub(crate) fn is_current(entry_path: &str, pathname: &str) -> bool {
    let pathname = if pathname == "/chat" { "/" } else { pathname };
    entry_path == pathname
}

pub(crate) fn entry_class(enabled: bool, current: bool) -> &'static str {
    match (enabled, current) {
        (false, _) => "sidebar__item sidebar__item--disabled",
        (true, true) => "sidebar__item sidebar__item--active",
        (true, false) => "sidebar__item",
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let enabled = move || entries_enabled(session.get().active, &pathname.get());
    let countdown = move || {
        if enabled() {
            session.get().countdown()
        } else {
            None
        }
    };

    let on_logout = move |_| {
        let mut guard = browser_guard(session);
        guard.logout();
        navigate(DEFAULT_AUTH_PATH, NavigateOptions::default());
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar__title">"Bytecraft Cookbook"</div>
            <ul class="sidebar__menu">
                {MENU
                    .iter()
                    .map(|entry| {
                        let entry = *entry;
                        let current = move || is_current(entry.path, &pathname.get());
                        view! {
                            <li class=move || entry_class(enabled(), current())>
                                {move || {
                                    if enabled() {
                                        view! { <A href=entry.path>{entry.label}</A> }.into_any()
                                    } else {
                                        view! { <span>{entry.label}</span> }.into_any()
                                    }
                                }}
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
                <li class=move || entry_class(enabled(), false)>
                    <button class="sidebar__logout" disabled=move || !enabled() on:click=on_logout>
                        "Log out"
                    </button>
                </li>
            </ul>
            <Show when=move || countdown().is_some()>
                <div class="sidebar__countdown">
                    "Session expires in: "
                    <strong>{move || countdown().unwrap_or_default()}</strong>
                </div>
            </Show>
        </nav>
    }
}
