//! Expandable recipe card used by chat replies and the favorites list.

#[cfg(test)]
#[path = "recipe_card_test.rs"]
mod recipe_card_test;

use leptos::prelude::*;

use crate::net::types::Recipe;

const BLOCK_TAGS: [&str; 7] = ["li", "p", "br", "ol", "ul", "div", "h3"];

/// Instruction text split into steps, with provider markup removed.
///
/// Block-level tags and newlines end a step; inline tags are dropped.
pub(crate) fn instruction_steps(html: &str) -> Vec<String> {
    let mut steps = Vec::new();
    let mut current = String::new();
    let mut chars = html.chars();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                let tag: String = chars.by_ref().take_while(|c| *c != '>').collect();
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                if BLOCK_TAGS.contains(&name.as_str()) {
                    push_step(&mut steps, &mut current);
                }
            }
            '\n' => push_step(&mut steps, &mut current),
            _ => current.push(c),
        }
    }
    push_step(&mut steps, &mut current);
    steps
}

fn push_step(steps: &mut Vec<String>, current: &mut String) {
    let text = decode_entities(current.trim());
    if !text.is_empty() {
        steps.push(text);
    }
    current.clear();
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// "25 min · 4 servings", omitting unknown parts.
pub(crate) fn recipe_meta(recipe: &Recipe) -> String {
    let mut parts = Vec::new();
    if recipe.ready_in_minutes > 0 {
        parts.push(format!("{} min", recipe.ready_in_minutes));
    }
    if recipe.servings > 0 {
        parts.push(format!("{} servings", recipe.servings));
    }
    parts.join(" · ")
}

/// Recipe summary that expands to ingredients and steps.
///
/// `on_remove` adds a remove button, used by the favorites list.
#[component]
pub fn RecipeCard(recipe: Recipe, #[prop(optional_no_strip)] on_remove: Option<Callback<()>>) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let meta = recipe_meta(&recipe);
    let steps = instruction_steps(&recipe.instructions);
    let ingredients = recipe.ingredients.clone();

    view! {
        <article class="recipe-card">
            {recipe.image.clone().map(|src| view! { <img class="recipe-card__image" src=src alt=recipe.title.clone()/> })}
            <h3 class="recipe-card__title">{recipe.title.clone()}</h3>
            {(!meta.is_empty()).then(|| view! { <p class="recipe-card__meta">{meta}</p> })}
            <Show when=move || expanded.get()>
                <ul class="recipe-card__ingredients">
                    {ingredients.iter().map(|i| view! { <li>{i.clone()}</li> }).collect::<Vec<_>>()}
                </ul>
                <ol class="recipe-card__steps">
                    {steps.iter().map(|s| view! { <li>{s.clone()}</li> }).collect::<Vec<_>>()}
                </ol>
            </Show>
            <div class="recipe-card__actions">
                <button class="btn" on:click=move |_| expanded.update(|open| *open = !*open)>
                    {move || if expanded.get() { "Close" } else { "Show recipe" }}
                </button>
                {on_remove.map(|on_remove| {
                    view! {
                        <button class="btn btn--danger" on:click=move |_| on_remove.run(())>
                            "Remove"
                        </button>
                    }
                })}
            </div>
        </article>
    }
}
