//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::SessionGuard;

use crate::components::{protected::Protected, session_notice::SessionNotice, sidebar::Sidebar};
use crate::pages::{
    auth::AuthPage, chat::ChatPage, favorites::FavoritesPage, pantry::PantryPage, preferences::PreferencesPage,
    profile::ProfilePage,
};
use crate::state::session::SessionView;
use crate::util::browser::{BrowserClock, BrowserStorage};

/// Root application component.
///
/// Seeds the session view from storage without side effects; the first
/// protected navigation performs the real evaluation.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let snapshot = SessionGuard::new(BrowserStorage, BrowserClock).snapshot();
    let session = RwSignal::new(SessionView::from_snapshot(&snapshot));
    provide_context(session);

    view! {
        <Title text="Cookbook"/>

        <Router>
            <div class="main-layout">
                <Sidebar/>
                <main class="main-layout__content">
                    <SessionNotice/>
                    <Routes fallback=|| view! { <Redirect path="/"/> }>
                        <Route path=StaticSegment("auth") view=AuthPage/>
                        <Route
                            path=StaticSegment("")
                            view=|| view! { <Protected><ChatPage/></Protected> }
                        />
                        <Route
                            path=StaticSegment("chat")
                            view=|| view! { <Protected><ChatPage/></Protected> }
                        />
                        <Route
                            path=StaticSegment("pantry")
                            view=|| view! { <Protected><PantryPage/></Protected> }
                        />
                        <Route
                            path=StaticSegment("preferences")
                            view=|| view! { <Protected><PreferencesPage/></Protected> }
                        />
                        <Route
                            path=StaticSegment("favorites")
                            view=|| view! { <Protected><FavoritesPage/></Protected> }
                        />
                        <Route
                            path=StaticSegment("profile")
                            view=|| view! { <Protected><ProfilePage/></Protected> }
                        />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
