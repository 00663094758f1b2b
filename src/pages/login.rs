use crate::components::Notice;
use crate::hooks::{use_store, use_text_input};
use crate::routes::Route;
use log::{error, warn};
use pantry_pilot::api::ApiClient;
use pantry_pilot::session::{
    login_credentials, login_failure_message, BrowserSessionStore, Session, SessionStore,
};
use pantry_pilot::store::AppAction;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let store = use_store();
    let navigator = use_navigator();
    let (username, on_username) = use_text_input(String::new());
    let (password, on_password) = use_text_input(String::new());
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);
    let show_password = use_state(|| false);

    let login = {
        let store = store.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        Callback::from(move |_: ()| {
            if *is_loading {
                return;
            }
            let credentials = match login_credentials(&username, &password) {
                Ok(c) => c,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            is_loading.set(true);
            error.set(None);

            let store = store.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::new(None).login(&credentials).await {
                    Ok(response) => match Session::from_auth(&response, &credentials.username) {
                        Some(session) => {
                            if let Err(e) = BrowserSessionStore.save(&session) {
                                warn!("session not persisted: {}", e);
                            }
                            store.dispatch(AppAction::SignedIn(session));
                            if let Some(navigator) = navigator {
                                navigator.push(&Route::RecipeMatcher);
                            }
                        }
                        None => error.set(Some(login_failure_message(&response))),
                    },
                    Err(e) => {
                        error!("login failed: {}", e);
                        error.set(Some("Server error. Try again later.".to_string()));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    let onsubmit = {
        let login = login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            login.emit(());
        })
    };
    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <img src="/assets/logo.png" alt="PantryPilot Logo" class="logo" />
                <h1>{ "Welcome Back" }</h1>
                <p class="subtitle">{ "Sign in to your Pantry Pilot account" }</p>

                if let Some(err) = &*error {
                    <Notice message={err.clone()} />
                }

                <form {onsubmit}>
                    <input
                        type="text"
                        placeholder="Username"
                        value={(*username).clone()}
                        oninput={on_username}
                    />
                    <div class="password-field">
                        <input
                            type={if *show_password { "text" } else { "password" }}
                            placeholder="Password"
                            value={(*password).clone()}
                            oninput={on_password}
                        />
                        <button type="button" class="btn-reveal" onclick={toggle_password}>
                            { if *show_password { "Hide" } else { "Show" } }
                        </button>
                    </div>
                    <button type="submit" class="btn-primary" disabled={*is_loading}>
                        { if *is_loading { "Signing In..." } else { "Sign In" } }
                    </button>
                </form>

                <p class="auth-switch">
                    { "Don't have an account? " }
                    <Link<Route> to={Route::Register}>{ "Create one" }</Link<Route>>
                </p>
            </div>
        </div>
    }
}
