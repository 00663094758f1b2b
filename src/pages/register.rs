use crate::components::Notice;
use crate::hooks::use_text_input;
use crate::routes::Route;
use log::{error, info};
use pantry_pilot::api::ApiClient;
use pantry_pilot::session::registration_credentials;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let navigator = use_navigator();
    let (username, on_username) = use_text_input(String::new());
    let (password, on_password) = use_text_input(String::new());
    let (confirm, on_confirm) = use_text_input(String::new());
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_loading {
                return;
            }
            let credentials = match registration_credentials(&username, &password, &confirm) {
                Ok(c) => c,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            is_loading.set(true);
            error.set(None);

            let navigator = navigator.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::new(None).register(&credentials).await {
                    Ok(response) => match response.error {
                        Some(message) => error.set(Some(message)),
                        None => {
                            info!("registered {}", credentials.username);
                            if let Some(navigator) = navigator {
                                navigator.push(&Route::Login);
                            }
                        }
                    },
                    Err(e) => {
                        error!("registration failed: {}", e);
                        error.set(Some("Registration failed. Try again later.".to_string()));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <img src="/assets/logo.png" alt="PantryPilot Logo" class="logo" />
                <h1>{ "Create Account" }</h1>
                <p class="subtitle">{ "Start turning your pantry into meals" }</p>

                if let Some(err) = &*error {
                    <Notice message={err.clone()} />
                }

                <form {onsubmit}>
                    <input type="text" placeholder="Username"
                        value={(*username).clone()} oninput={on_username} />
                    <input type="password" placeholder="Password"
                        value={(*password).clone()} oninput={on_password} />
                    <input type="password" placeholder="Confirm password"
                        value={(*confirm).clone()} oninput={on_confirm} />
                    <button type="submit" class="btn-primary" disabled={*is_loading}>
                        { if *is_loading { "Creating Account..." } else { "Create Account" } }
                    </button>
                </form>

                <p class="auth-switch">
                    { "Already registered? " }
                    <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                </p>
            </div>
        </div>
    }
}
