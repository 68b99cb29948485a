//! Chat page: conversation with the recipe assistant.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::recipe_card::RecipeCard;
use crate::net::types::ChatMode;
use crate::state::chat::{ChatLog, Speaker};
use crate::state::session::SessionView;
use crate::util::guard::SessionAccess;

pub(crate) fn greeting(username: Option<&str>) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("Welcome back, {name}!"),
        _ => "Welcome back!".to_owned(),
    }
}

pub(crate) fn bubble_class(speaker: Speaker, failed: bool) -> &'static str {
    match (speaker, failed) {
        (Speaker::User, _) => "chat-page__message chat-page__message--user",
        (Speaker::Bot, false) => "chat-page__message chat-page__message--bot",
        (Speaker::Bot, true) => "chat-page__message chat-page__message--bot chat-page__message--error",
    }
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let access = SessionAccess::new(session, use_navigate());

    let chat = RwSignal::new(ChatLog::default());
    let input = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get();
        let Some(request) = chat.try_update(|log| log.begin(&text)).flatten() else {
            return;
        };
        input.set(String::new());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move { crate::net::api::send_chat(&token, &request).await })
                .await;
            match result {
                Ok(response) => chat.update(|log| log.receive(response)),
                Err(crate::net::api::ApiError::Unauthorized) => {}
                Err(e) => {
                    log::warn!("chat: {e}");
                    chat.update(ChatLog::fail);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, access);
        }
    };

    view! {
        <section class="chat-page">
            <header class="chat-page__header">
                <h1>{move || greeting(session.get().username())}</h1>
                <select
                    class="chat-page__mode"
                    on:change=move |ev| {
                        if let Some(mode) = ChatMode::parse(&event_target_value(&ev)) {
                            chat.update(|log| log.mode = mode);
                        }
                    }
                >
                    {ChatMode::ALL
                        .into_iter()
                        .map(|mode| {
                            view! {
                                <option value=mode.as_str() selected=move || chat.get().mode == mode>
                                    {mode.label()}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </header>
            <div class="chat-page__messages">
                {move || {
                    chat.get()
                        .messages
                        .into_iter()
                        .map(|msg| {
                            view! {
                                <div class=bubble_class(msg.speaker, msg.failed)>
                                    <p class="chat-page__text">{msg.text}</p>
                                    {msg
                                        .recipes
                                        .into_iter()
                                        .map(|recipe| view! { <RecipeCard recipe=recipe/> })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <Show when=move || chat.get().loading>
                    <div class="chat-page__loading">"Thinking..."</div>
                </Show>
            </div>
            <form class="chat-page__input-row" on:submit=on_submit>
                <input
                    class="chat-page__input"
                    type="text"
                    placeholder="Ask for a recipe..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || chat.get().loading>
                    "Send"
                </button>
            </form>
        </section>
    }
}
