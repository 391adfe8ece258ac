//! Register Form Component
//!
//! Account creation. A successful registration logs the user in.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::RegisterRequest;
use crate::components::login_form::{looks_like_email, MIN_PASSWORD_LEN};
use crate::context::AppContext;
use crate::route::Route;
use crate::store::{use_app_store, use_services, AppStateStoreFields};

const MIN_NAME_LEN: usize = 2;

/// Raw form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Per-field messages; all `None` means the input can be sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn name_error(name: &str, required: &'static str, too_short: &'static str) -> Option<&'static str> {
    let name = name.trim();
    if name.is_empty() {
        Some(required)
    } else if name.chars().count() < MIN_NAME_LEN {
        Some(too_short)
    } else {
        None
    }
}

impl RegisterInput {
    pub fn errors(&self) -> RegisterErrors {
        let email = self.email.trim();
        RegisterErrors {
            first_name: name_error(&self.first_name, "First name is required", "First name must be at least 2 characters"),
            last_name: name_error(&self.last_name, "Last name is required", "Last name must be at least 2 characters"),
            email: if email.is_empty() {
                Some("Email is required")
            } else if !looks_like_email(email) {
                Some("Please enter a valid email")
            } else {
                None
            },
            password: if self.password.is_empty() {
                Some("Password is required")
            } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                Some("Password must be at least 6 characters")
            } else {
                None
            },
            confirm_password: if self.confirm_password.is_empty() {
                Some("Please confirm your password")
            } else if self.confirm_password != self.password {
                Some("Passwords do not match")
            } else {
                None
            },
        }
    }

    /// Request body; the confirmation stays client-side
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[component]
fn RegisterField(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    input: RwSignal<RegisterInput>,
    touched: ReadSignal<bool>,
    get: fn(&RegisterInput) -> &String,
    set: fn(&mut RegisterInput, String),
    error: fn(&RegisterErrors) -> Option<&'static str>,
) -> impl IntoView {
    let message = move || {
        if touched.get() {
            input.with(|i| error(&i.errors()))
        } else {
            None
        }
    };

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                id=id
                type=input_type
                prop:value=move || input.with(|i| get(i).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    input.update(|i| set(i, value));
                }
            />
            {move || message().map(|m| view! { <span class="field-error">{m}</span> })}
        </label>
    }
}

#[component]
pub fn RegisterForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let services = use_services();

    let input = RwSignal::new(RegisterInput::default());
    let (touched, set_touched) = signal(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_touched.set(true);
        if busy.get_untracked() || !input.with_untracked(|i| i.errors().is_empty()) {
            return;
        }

        let request = input.with_untracked(RegisterInput::to_request);
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match services.auth().register(&request).await {
                Ok(user) => {
                    store.user().set(Some(user));
                    ctx.set_logged_in(true);
                    ctx.navigate(Route::Items);
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
            <h2>"Create account"</h2>
            {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

            <form on:submit=submit>
                <RegisterField
                    id="firstName" label="First name" input_type="text" input=input touched=touched
                    get=|i| &i.first_name set=|i, v| i.first_name = v error=|e| e.first_name
                />
                <RegisterField
                    id="lastName" label="Last name" input_type="text" input=input touched=touched
                    get=|i| &i.last_name set=|i, v| i.last_name = v error=|e| e.last_name
                />
                <RegisterField
                    id="email" label="Email" input_type="email" input=input touched=touched
                    get=|i| &i.email set=|i, v| i.email = v error=|e| e.email
                />
                <RegisterField
                    id="password" label="Password" input_type="password" input=input touched=touched
                    get=|i| &i.password set=|i, v| i.password = v error=|e| e.password
                />
                <RegisterField
                    id="confirmPassword" label="Confirm password" input_type="password" input=input touched=touched
                    get=|i| &i.confirm_password set=|i, v| i.confirm_password = v error=|e| e.confirm_password
                />

                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Register" }}
                </button>
            </form>

            <p class="auth-switch">
                "Already have an account? "
                <a href="#/login">"Log in"</a>
            </p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegisterInput {
        RegisterInput {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(valid().errors().is_empty());
    }

    #[test]
    fn test_empty_input_reports_every_field() {
        let errors = RegisterInput::default().errors();
        assert_eq!(errors.first_name, Some("First name is required"));
        assert_eq!(errors.last_name, Some("Last name is required"));
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.password, Some("Password is required"));
        assert_eq!(errors.confirm_password, Some("Please confirm your password"));
    }

    #[test]
    fn test_short_names_and_password() {
        let input = RegisterInput {
            first_name: "A".to_string(),
            last_name: "D".to_string(),
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..valid()
        };
        let errors = input.errors();
        assert_eq!(errors.first_name, Some("First name must be at least 2 characters"));
        assert_eq!(errors.last_name, Some("Last name must be at least 2 characters"));
        assert_eq!(errors.password, Some("Password must be at least 6 characters"));
        assert_eq!(errors.confirm_password, None);
    }

    #[test]
    fn test_password_mismatch() {
        let input = RegisterInput { confirm_password: "different".to_string(), ..valid() };
        assert_eq!(input.errors().confirm_password, Some("Passwords do not match"));
    }

    #[test]
    fn test_request_drops_confirmation() {
        let input = RegisterInput { first_name: "  John ".to_string(), ..valid() };
        let request = input.to_request();
        assert_eq!(request.first_name, "John");
        assert_eq!(request.password, "password123");
    }
}
