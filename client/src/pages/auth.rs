//! Public auth page: sign in or create an account.
//!
//! A successful login hands the issued token to the session guard, which
//! stores it with its identity snapshot before the app navigates home.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::LoginError;

use crate::net::types::RegisterRequest;
use crate::state::session::SessionView;

const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Create account",
        }
    }

    pub(crate) fn switch_label(self) -> &'static str {
        match self {
            Self::Login => "No account yet? Register",
            Self::Register => "Already registered? Sign in",
        }
    }
}

/// Trimmed username and raw password, both required.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(String, String), String> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(FILL_ALL_FIELDS.to_owned());
    }
    Ok((username.to_owned(), password.to_owned()))
}

pub(crate) fn validate_register_input(
    username: &str,
    email: &str,
    full_name: &str,
    password: &str,
) -> Result<RegisterRequest, String> {
    let username = username.trim();
    let email = email.trim();
    let full_name = full_name.trim();
    if username.is_empty() || email.is_empty() || full_name.is_empty() || password.is_empty() {
        return Err(FILL_ALL_FIELDS.to_owned());
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.".to_owned());
    }
    Ok(RegisterRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        full_name: Some(full_name.to_owned()),
        password: password.to_owned(),
    })
}

/// Message for a token the backend issued but the guard refused.
pub(crate) fn login_failure_message(err: &LoginError) -> String {
    match err {
        LoginError::Decode(_) | LoginError::Malformed => "The server returned an unreadable session token.".to_owned(),
        LoginError::AlreadyExpired => "The server returned an expired session. Check your device clock.".to_owned(),
        LoginError::Storage(_) => "Could not save the session. Is browser storage enabled?".to_owned(),
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let mode = RwSignal::new(AuthMode::Login);
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        match mode.get() {
            AuthMode::Login => {
                let (user, pass) = match validate_login_input(&username.get(), &password.get()) {
                    Ok(input) => input,
                    Err(msg) => {
                        info.set(msg);
                        return;
                    }
                };
                busy.set(true);
                info.set("Signing in...".to_owned());

                #[cfg(feature = "csr")]
                {
                    let navigate = navigate.clone();
                    leptos::task::spawn_local(async move {
                        match crate::net::api::login(&user, &pass).await {
                            Ok(resp) => {
                                let mut guard = crate::util::guard::browser_guard(session);
                                match guard.login(&resp.access_token) {
                                    Ok(_) => {
                                        navigate("/", leptos_router::NavigateOptions::default());
                                        return;
                                    }
                                    Err(e) => {
                                        log::warn!("auth: issued token refused: {e}");
                                        info.set(login_failure_message(&e));
                                    }
                                }
                            }
                            Err(e) => info.set(format!("Sign in failed: {e}")),
                        }
                        busy.set(false);
                    });
                }
                #[cfg(not(feature = "csr"))]
                {
                    let _ = (user, pass, session);
                }
            }
            AuthMode::Register => {
                let request = match validate_register_input(
                    &username.get(),
                    &email.get(),
                    &full_name.get(),
                    &password.get(),
                ) {
                    Ok(request) => request,
                    Err(msg) => {
                        info.set(msg);
                        return;
                    }
                };
                busy.set(true);
                info.set("Creating account...".to_owned());

                #[cfg(feature = "csr")]
                leptos::task::spawn_local(async move {
                    match crate::net::api::register(&request).await {
                        Ok(()) => {
                            mode.set(AuthMode::Login);
                            password.set(String::new());
                            info.set("Account created. You can sign in now.".to_owned());
                        }
                        Err(e) => info.set(format!("Registration failed: {e}")),
                    }
                    busy.set(false);
                });
                #[cfg(not(feature = "csr"))]
                {
                    let _ = request;
                }
            }
        }
    };

    let on_switch = move |_| {
        mode.update(|m| *m = m.toggled());
        info.set(String::new());
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{move || mode.get().title()}</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() == AuthMode::Register>
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().title()}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <button class="auth-switch" type="button" on:click=on_switch>
                    {move || mode.get().switch_label()}
                </button>
            </div>
        </div>
    }
}
