//! Favorites page: recipes the user saved from chat.

#[cfg(test)]
#[path = "favorites_test.rs"]
mod favorites_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::recipe_card::RecipeCard;
use crate::net::api::ApiError;
use crate::net::types::Recipe;
use crate::state::session::SessionView;
use crate::util::guard::SessionAccess;

/// Heading line for the list, e.g. "3 saved recipes".
pub(crate) fn favorites_heading(count: usize) -> String {
    match count {
        0 => "No saved recipes yet.".to_owned(),
        1 => "1 saved recipe".to_owned(),
        n => format!("{n} saved recipes"),
    }
}

/// Drop a removed recipe from the rendered list.
pub(crate) fn without(recipes: &[Recipe], id: i64) -> Vec<Recipe> {
    recipes.iter().filter(|r| r.id != Some(id)).cloned().collect()
}

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let access = SessionAccess::new(session, use_navigate());

    let loaded = LocalResource::new(move || {
        access.call(|token| async move { crate::net::api::fetch_favorites(&token).await })
    });
    let removed = RwSignal::new(Vec::<i64>::new());
    let info = RwSignal::new(String::new());

    let remove = move |id: i64| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move { crate::net::api::delete_favorite(&token, id).await })
                .await;
            match result {
                Ok(()) => removed.update(|ids| ids.push(id)),
                Err(ApiError::Unauthorized) => {}
                Err(e) => info.set(format!("Could not remove recipe: {e}")),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (id, info);
        }
    };

    view! {
        <section class="favorites-page">
            <h1>"Favorite recipes"</h1>
            <Show when=move || !info.get().is_empty()>
                <p class="favorites-page__error">{move || info.get()}</p>
            </Show>
            <Suspense fallback=move || view! { <p>"Loading favorites..."</p> }>
                {move || {
                    loaded
                        .get()
                        .map(|result| match result {
                            Ok(recipes) => {
                                let recipes = removed
                                    .get()
                                    .into_iter()
                                    .fold(recipes, |list, id| without(&list, id));
                                view! {
                                    <p class="favorites-page__count">{favorites_heading(recipes.len())}</p>
                                    <div class="favorites-page__list">
                                        {recipes
                                            .into_iter()
                                            .map(|recipe| {
                                                let on_remove = recipe
                                                    .id
                                                    .map(|id| Callback::new(move |()| remove(id)));
                                                view! { <RecipeCard recipe=recipe on_remove=on_remove/> }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(ApiError::Unauthorized) => view! { <p>"Session ended."</p> }.into_any(),
                            Err(e) => {
                                view! { <p class="favorites-page__error">{format!("Could not load favorites: {e}")}</p> }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}
