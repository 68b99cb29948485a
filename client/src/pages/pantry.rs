//! Pantry page: step-by-step wizard that turns stored ingredients into a
//! generated recipe.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stored items come from `/pantry/`; adding or removing one persists
//! immediately. The cook request combines the current selection with the
//! saved preferences from `/settings/`.

#[cfg(test)]
#[path = "pantry_test.rs"]
mod pantry_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::ApiError;
use crate::state::pantry::{
    ALWAYS_HAVE, EXTRAS_TODAY, METHODS, PEOPLE_RANGE, PREP_TIME_RANGE, PREP_TIME_STEP, PantryWizard, WizardStep,
    summary, tip_for,
};
use crate::state::session::SessionView;
use crate::util::guard::SessionAccess;

/// Absolute image URL; the backend returns paths relative to itself.
pub(crate) fn image_src(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else {
        crate::config::join_url(crate::config::api_base_url(), path)
    }
}

fn random_sample() -> f64 {
    #[cfg(feature = "csr")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(feature = "csr"))]
    {
        0.0
    }
}

#[component]
fn IngredientStep(
    category: &'static str,
    hint: &'static str,
    wizard: RwSignal<PantryWizard>,
    info: RwSignal<String>,
    access: SessionAccess,
) -> impl IntoView {
    let draft = RwSignal::new(String::new());

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let new_item = match wizard.with(|w| w.new_item(category, &draft.get())) {
            Ok(item) => item,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        draft.set(String::new());
        info.set(String::new());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move { crate::net::api::add_pantry_item(&token, &new_item).await })
                .await;
            match result {
                Ok(stored) => wizard.update(|w| w.insert(stored)),
                Err(ApiError::Unauthorized) => {}
                Err(e) => info.set(e.to_string()),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (new_item, access);
        }
    };

    let on_remove = move |id: i64| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move { crate::net::api::delete_pantry_item(&token, id).await })
                .await;
            match result {
                Ok(()) => wizard.update(|w| w.remove(id)),
                Err(ApiError::Unauthorized) => {}
                Err(e) => info.set(format!("Could not remove ingredient: {e}")),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    };

    view! {
        <div class="pantry-page__group">
            <strong>{category}</strong>
            <Show when=move || wizard.with(|w| w.items_in(category).is_empty())>
                <p class="pantry-page__hint">{hint}</p>
            </Show>
            <ul class="pantry-page__tags">
                {move || {
                    wizard
                        .with(|w| w.items_in(category))
                        .into_iter()
                        .map(|item| {
                            let name = item.name.clone();
                            let selected = {
                                let name = name.clone();
                                move || wizard.with(|w| w.is_selected(&name))
                            };
                            view! {
                                <li class="pantry-page__tag" class:pantry-page__tag--selected=selected>
                                    <span on:click=move |_| wizard.update(|w| w.toggle_selected(&name))>
                                        {item.name}
                                    </span>
                                    <button type="button" on:click=move |_| on_remove(item.id)>
                                        "x"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <form class="pantry-page__add" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Add an ingredient..."
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"+"</button>
            </form>
        </div>
    }
}

#[component]
fn MethodStep(wizard: RwSignal<PantryWizard>) -> impl IntoView {
    view! {
        <div class="pantry-page__group">
            {METHODS
                .into_iter()
                .map(|method| {
                    view! {
                        <label class="pantry-page__option">
                            <input
                                type="checkbox"
                                prop:checked=move || wizard.with(|w| w.methods.iter().any(|m| m == method))
                                on:change=move |_| wizard.update(|w| w.toggle_method(method))
                            />
                            {method}
                        </label>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn PortionStep(wizard: RwSignal<PantryWizard>) -> impl IntoView {
    view! {
        <div class="pantry-page__params">
            <label>
                "Cooking for "
                <input
                    type="number"
                    min=PEOPLE_RANGE.0
                    max=PEOPLE_RANGE.1
                    prop:value=move || wizard.with(|w| w.people.to_string())
                    on:input=move |ev| wizard.update(|w| w.set_people(&event_target_value(&ev)))
                />
                " people"
            </label>
            <label>
                {move || format!("Preparation time: {} min", wizard.with(|w| w.prep_time))}
                <input
                    type="range"
                    min=PREP_TIME_RANGE.0
                    max=PREP_TIME_RANGE.1
                    step=PREP_TIME_STEP
                    prop:value=move || wizard.with(|w| w.prep_time.to_string())
                    on:input=move |ev| wizard.update(|w| w.set_prep_time(&event_target_value(&ev)))
                />
            </label>
        </div>
    }
}

#[component]
fn ReviewStep(wizard: RwSignal<PantryWizard>) -> impl IntoView {
    let line = move |label: &'static str, value: String| {
        view! {
            <li>
                <b>{label}</b>
                " "
                {value}
            </li>
        }
    };
    move || {
        let w = wizard.get();
        view! {
            <ul class="pantry-page__review">
                {line("Always have:", summary(&w.selected_in(ALWAYS_HAVE)))}
                {line("Today:", summary(&w.selected_in(EXTRAS_TODAY)))}
                {line("Methods:", summary(&w.methods))}
                {line("For:", format!("{} people, {} min", w.people, w.prep_time))}
            </ul>
        }
    }
}

#[component]
pub fn PantryPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let access = SessionAccess::new(session, use_navigate());

    let wizard = RwSignal::new(PantryWizard::default());
    let info = RwSignal::new(String::new());
    let cooking = RwSignal::new(false);
    let tip = tip_for(random_sample());

    let pantry = LocalResource::new(move || {
        access.call(|token| async move { crate::net::api::fetch_pantry(&token).await })
    });
    Effect::new(move || match pantry.get() {
        Some(Ok(items)) => wizard.update(|w| w.load(items)),
        Some(Err(ApiError::Unauthorized)) | None => {}
        Some(Err(e)) => info.set(format!("Could not load pantry: {e}")),
    });

    let go = move |step: WizardStep| {
        info.set(String::new());
        wizard.update(|w| w.step = step);
    };

    let on_cook = move |_| {
        if cooking.get() {
            return;
        }
        cooking.set(true);
        info.set(String::new());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move {
                    let settings = match crate::net::api::fetch_settings(&token).await {
                        Ok(settings) => settings,
                        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                        Err(e) => {
                            log::warn!("pantry: cooking without preferences: {e}");
                            crate::net::types::Settings::default()
                        }
                    };
                    let request = wizard.with_untracked(|w| w.cook_request(&settings));
                    crate::net::api::cook(&token, &request).await
                })
                .await;
            match result {
                Ok(recipe) => wizard.update(|w| w.show_recipe(recipe)),
                Err(ApiError::Unauthorized) => {}
                Err(e) => info.set(format!("Could not generate a recipe: {e}")),
            }
            cooking.set(false);
        });
    };

    let step = move || wizard.with(|w| w.step);
    let nav = move |back: Option<WizardStep>, forward: Option<WizardStep>| {
        view! {
            <div class="pantry-page__nav">
                {back.map(|s| view! { <button class="btn" on:click=move |_| go(s)>"Back"</button> })}
                {forward.map(|s| view! { <button class="btn btn--primary" on:click=move |_| go(s)>"Next"</button> })}
            </div>
        }
    };

    view! {
        <section class="pantry-page">
            <p class="pantry-page__tip">{format!("Tip of the day: {tip}")}</p>
            <h1>{move || step().title()}</h1>
            <div class="pantry-page__progress">
                <div class="pantry-page__progress-bar" style:width=move || format!("{}%", step().progress_percent())></div>
            </div>
            <Show when=move || !info.get().is_empty()>
                <p class="pantry-page__message">{move || info.get()}</p>
            </Show>
            <Show when=move || cooking.get()>
                <div class="pantry-page__loading">"Generating your recipe..."</div>
            </Show>
            {move || match step() {
                WizardStep::AlwaysHave => view! {
                    <IngredientStep
                        category=ALWAYS_HAVE
                        hint="Add the staples you always keep at home."
                        wizard=wizard
                        info=info
                        access=access
                    />
                    {nav(None, Some(WizardStep::Methods))}
                }
                    .into_any(),
                WizardStep::Methods => view! {
                    <MethodStep wizard=wizard/>
                    {nav(Some(WizardStep::AlwaysHave), Some(WizardStep::ExtrasToday))}
                }
                    .into_any(),
                WizardStep::ExtrasToday => view! {
                    <IngredientStep
                        category=EXTRAS_TODAY
                        hint="Add anything extra you have today."
                        wizard=wizard
                        info=info
                        access=access
                    />
                    {nav(Some(WizardStep::Methods), Some(WizardStep::Portions))}
                }
                    .into_any(),
                WizardStep::Portions => view! {
                    <PortionStep wizard=wizard/>
                    {nav(Some(WizardStep::ExtrasToday), Some(WizardStep::Review))}
                }
                    .into_any(),
                WizardStep::Review => view! {
                    <ReviewStep wizard=wizard/>
                    {nav(Some(WizardStep::Portions), None)}
                    <button class="btn btn--primary" disabled=move || cooking.get() on:click=on_cook>
                        {move || if cooking.get() { "Generating..." } else { "Let's cook!" }}
                    </button>
                }
                    .into_any(),
                WizardStep::Recipe => view! {
                    {move || {
                        wizard
                            .with(|w| w.recipe.clone())
                            .map(|recipe| {
                                view! {
                                    {recipe
                                        .image_url
                                        .map(|path| view! { <img class="pantry-page__image" src=image_src(&path) alt="Suggested dish"/> })}
                                    <pre class="pantry-page__recipe">{recipe.result}</pre>
                                }
                            })
                    }}
                    {nav(Some(WizardStep::Review), None)}
                    <button class="btn" disabled=move || cooking.get() on:click=on_cook>"Generate another"</button>
                    <button class="btn" on:click=move |_| wizard.update(PantryWizard::restart)>"New search"</button>
                }
                    .into_any(),
            }}
        </section>
    }
}
