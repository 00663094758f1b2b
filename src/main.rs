//! Entry point of the PantryPilot web client.
//! Provides the application store and the router to every screen.

use pantry_pilot::session::{BrowserSessionStore, SessionStore};
use pantry_pilot::store::{AppState, AppStore};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod pages;
mod routes;

use routes::{switch, Route};

#[function_component(App)]
fn app() -> Html {
    let store: AppStore = use_reducer_eq(|| AppState::new(BrowserSessionStore.load()));

    html! {
        <ContextProvider<AppStore> context={store}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppStore>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    log::info!("PantryPilot starting");
    yew::Renderer::<App>::new().render();
}
