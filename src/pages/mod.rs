//! Routed screens and the side effects they share.

mod detail;
mod liked;
mod login;
mod matcher;
mod pantry;
mod register;

pub use detail::RecipeDetailPage;
pub use liked::LikedPage;
pub use login::LoginPage;
pub use matcher::MatcherPage;
pub use register::RegisterPage;

use crate::routes::Route;
use pantry_pilot::api::ApiClient;
use pantry_pilot::likes::LikeAction;
use pantry_pilot::session::{BrowserSessionStore, SessionStore};
use pantry_pilot::store::{AppAction, AppStore};
use pantry_pilot::RecipeId;
use yew_router::prelude::Navigator;

pub(crate) fn api_client(store: &AppStore) -> ApiClient {
    ApiClient::new(store.session.as_ref())
}

/// Forget the session everywhere and return to the login screen.
pub(crate) fn sign_out(store: &AppStore, navigator: Option<&Navigator>) {
    BrowserSessionStore.clear();
    store.dispatch(AppAction::SignedOut);
    if let Some(navigator) = navigator {
        navigator.push(&Route::Login);
    }
}

/// Like or unlike `id`, applying the change once the server confirms it.
pub(crate) fn toggle_like(store: &AppStore, id: RecipeId) {
    let Some(action) = store.likes.plan_toggle(id) else {
        return;
    };
    store.dispatch(AppAction::ToggleStarted(id));

    let client = api_client(store);
    let epoch = store.epoch;
    let store = store.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let result = match action {
            LikeAction::Like => client.like(id).await,
            LikeAction::Unlike => client.unlike(id).await,
        };
        store.dispatch(AppAction::ToggleFinished { epoch, id, action, result });
    });
}
