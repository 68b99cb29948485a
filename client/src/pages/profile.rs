//! Profile page: authoritative user record plus password change.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is only trusted locally until the backend sees it. A 401 from
//! either call goes through `SessionAccess`, which hands it to the guard's
//! `reject()` and follows the redirect.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::ApiError;
use crate::net::types::{ChangePasswordRequest, UserProfile};
use crate::state::session::SessionView;
use crate::util::guard::SessionAccess;

pub(crate) fn validate_password_change(old_password: &str, new_password: &str) -> Result<ChangePasswordRequest, String> {
    if old_password.is_empty() || new_password.is_empty() {
        return Err("Please fill in both password fields.".to_owned());
    }
    if old_password == new_password {
        return Err("The new password must differ from the current one.".to_owned());
    }
    Ok(ChangePasswordRequest {
        old_password: old_password.to_owned(),
        new_password: new_password.to_owned(),
    })
}

/// Rows rendered in the profile card.
pub(crate) fn profile_rows(profile: &UserProfile) -> Vec<(&'static str, String)> {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" }.to_owned();
    vec![
        ("Username", profile.username.clone()),
        ("Email", profile.email.clone()),
        ("Full name", profile.full_name.clone().unwrap_or_else(|| "-".to_owned())),
        ("Active", yes_no(profile.is_active)),
        ("Verified", yes_no(profile.is_verified)),
    ]
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionView>>();
    let access = SessionAccess::new(session, use_navigate());

    let profile = LocalResource::new(move || {
        access.call(|token| async move { crate::net::api::fetch_me(&token).await })
    });

    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_password_change(&old_password.get(), &new_password.get()) {
            Ok(request) => request,
            Err(msg) => {
                info.set(msg);
                return;
            }
        };
        busy.set(true);
        info.set("Updating password...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = access
                .call(|token| async move { crate::net::api::change_password(&token, &request).await })
                .await;
            match result {
                Ok(()) => {
                    old_password.set(String::new());
                    new_password.set(String::new());
                    info.set("Password changed.".to_owned());
                }
                Err(ApiError::Unauthorized) => return,
                Err(e) => info.set(format!("Password change failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
        }
    };

    view! {
        <section class="profile-page">
            <h1>"My profile"</h1>
            <Suspense fallback=move || view! { <p>"Loading profile..."</p> }>
                {move || {
                    profile
                        .get()
                        .map(|result| match result {
                            Ok(user) => {
                                view! {
                                    <dl class="profile-card">
                                        {profile_rows(&user)
                                            .into_iter()
                                            .map(|(label, value)| {
                                                view! {
                                                    <dt>{label}</dt>
                                                    <dd>{value}</dd>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </dl>
                                }
                                    .into_any()
                            }
                            Err(ApiError::Unauthorized) => view! { <p>"Session ended."</p> }.into_any(),
                            Err(e) => {
                                view! { <p class="profile-page__error">{format!("Could not load profile: {e}")}</p> }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>

            <h2>"Change password"</h2>
            <form class="profile-form" on:submit=on_change_password>
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Current password"
                    prop:value=move || old_password.get()
                    on:input=move |ev| old_password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="New password"
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Change password"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
