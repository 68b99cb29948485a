//! Preferences page: allergies, diets, dislikes, and favorite ingredients.
//!
//! Edits stay local until saved; the saved copy is what the pantry wizard
//! sends with its cook request.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::ApiError;
use crate::net::types::Settings;
use crate::state::preferences::{
    ALLERGENS, DIETS, SettingsList, add_unique, list as entries, list_mut, remove, toggle,
};
use crate::state::session::SessionView;
use crate::util::guard::SessionAccess;

/// Status line after a save attempt.
pub(crate) fn save_message(result: &Result<Settings, ApiError>) -> String {
    match result {
        Ok(_) => "Preferences saved.".to_owned(),
        Err(ApiError::Unauthorized) => String::new(),
        Err(e) => format!("Could not save preferences: {e}"),
    }
}

#[component]
fn Checklist(title: &'static str, options: [&'static str; 6], list: SettingsList, settings: RwSignal<Settings>) -> impl IntoView {
    view! {
        <fieldset class="preferences-page__group">
            <legend>{title}</legend>
            {options
                .into_iter()
                .map(|option| {
                    let checked = move || settings.with(|s| entries(s, list).iter().any(|v| v == option));
                    view! {
                        <label class="preferences-page__option">
                            <input
                                type="checkbox"
                                prop:checked=checked
                                on:change=move |_| settings.update(|s| toggle(list_mut(s, list), option))
                            />
                            {option}
                        </label>
                    }
                })
                .collect::<Vec<_>>()}
        </fieldset>
    }
}

#[component]
fn FreeList(title: &'static str, placeholder: &'static str, list: SettingsList, settings: RwSignal<Settings>) -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = draft.get();
        settings.update(|s| {
            add_unique(list_mut(s, list), &value);
        });
        draft.set(String::new());
    };

    view! {
        <fieldset class="preferences-page__group">
            <legend>{title}</legend>
            <ul class="preferences-page__tags">
                {move || {
                    settings
                        .with(|s| entries(s, list).to_vec())
                        .into_iter()
                        .map(|entry| {
                            let value = entry.clone();
                            view! {
                                <li class="preferences-page__tag">
                                    {entry}
                                    <button
                                        class="preferences-page__remove"
                                        type="button"
                                        on:click=move |_| settings.update(|s| remove(list_mut(s, list), &value))
                                    >
                                        "x"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <form class="preferences-page__add" on:submit=on_add>
                <input
                    type="text"
                    placeholder=placeholder
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Add"</button>
            </form>
        </fieldset>
    }
}

#[component]
pub fn PreferencesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let access = SessionAccess::new(session, use_navigate());

    let settings = RwSignal::new(Settings::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let loaded = LocalResource::new(move || {
        access.call(|token| async move { crate::net::api::fetch_settings(&token).await })
    });
    Effect::new(move || {
        if let Some(Ok(stored)) = loaded.get() {
            settings.set(stored);
        }
    });

    let on_save = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Saving...".to_owned());
        let body = settings.get();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move { crate::net::api::save_settings(&token, &body).await })
                .await;
            info.set(save_message(&result));
            if let Ok(stored) = result {
                settings.set(stored);
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = body;
        }
    };

    view! {
        <section class="preferences-page">
            <h1>"Preferences"</h1>
            {move || {
                loaded
                    .get()
                    .and_then(Result::err)
                    .filter(|e| *e != ApiError::Unauthorized)
                    .map(|e| view! { <p class="preferences-page__error">{format!("Could not load preferences: {e}")}</p> })
            }}
            <Checklist title="Allergies" options=ALLERGENS list=SettingsList::Allergies settings=settings/>
            <Checklist title="Diet" options=DIETS list=SettingsList::Preferences settings=settings/>
            <FreeList
                title="Ingredients I dislike"
                placeholder="e.g. olives"
                list=SettingsList::Dislikes
                settings=settings
            />
            <FreeList
                title="Favorite ingredients"
                placeholder="e.g. basil"
                list=SettingsList::Favorites
                settings=settings
            />
            <button class="btn btn--primary" disabled=move || busy.get() on:click=on_save>
                "Save preferences"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
