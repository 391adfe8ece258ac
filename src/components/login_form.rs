//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::LoginRequest;
use crate::context::AppContext;
use crate::route::Route;
use crate::store::{use_app_store, use_services, AppStateStoreFields};

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Client-side checks; `(email_error, password_error)`
pub fn login_errors(email: &str, password: &str) -> (Option<&'static str>, Option<&'static str>) {
    let email = email.trim();
    let email_error = if email.is_empty() {
        Some("Email is required")
    } else if !looks_like_email(email) {
        Some("Please enter a valid email")
    } else {
        None
    };

    let password_error = if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    };

    (email_error, password_error)
}

pub(crate) fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[component]
pub fn LoginForm(return_url: Option<String>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let services = use_services();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (touched, set_touched) = signal(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let errors = move || login_errors(&email.get(), &password.get());
    let target = StoredValue::new(return_url);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_touched.set(true);
        if busy.get_untracked() {
            return;
        }
        let (email_error, password_error) = login_errors(&email.get_untracked(), &password.get_untracked());
        if email_error.is_some() || password_error.is_some() {
            return;
        }

        let credentials = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match services.auth().login(&credentials).await {
                Ok(user) => {
                    store.user().set(Some(user));
                    ctx.set_logged_in(true);
                    let next = target
                        .try_get_value()
                        .flatten()
                        .map(|url| Route::parse(&url))
                        .unwrap_or(Route::Items);
                    ctx.navigate(next);
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                    let _ = busy.try_set(false);
                }
            }
        });
    };

    view! {
        <section class="login">
            <h2>"Log in"</h2>
            {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

            <form on:submit=submit>
                <label class="form-field">
                    <span class="form-label">"Email"</span>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <Show when=move || touched.get()>
                        {move || errors().0.map(|m| view! { <span class="field-error">{m}</span> })}
                    </Show>
                </label>

                <label class="form-field">
                    <span class="form-label">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <Show when=move || touched.get()>
                        {move || errors().1.map(|m| view! { <span class="field-error">{m}</span> })}
                    </Show>
                </label>

                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>

            <p class="auth-switch">
                "No account yet? "
                <a href="#/register">"Register"</a>
            </p>
        </section>
    }
}
