use crate::routes::Route;
use gloo_timers::callback::Timeout;
use pantry_pilot::api::ApiClient;
use pantry_pilot::store::{AppAction, AppStore};
use pantry_pilot::ValidationError;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput {
    /// The current text content of the input field.
    pub text: String,
    /// An optional error message if the last validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event. Updates the internal text state.
    pub on_text_input: Callback<InputEvent>,
    /// Callback to validate the current text and show or clear the error.
    /// Typically used with `onchange`.
    pub on_commit: Callback<()>,
    /// Empties the field and clears any error.
    pub clear: Callback<()>,
}

/// Custom hook to manage state for a validated input field.
#[hook]
pub fn use_validated_input<T: 'static>(
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, ValidationError>>,
) -> ValidatedInput {
    let text_state_handle: UseStateHandle<String> = use_state(String::new);
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let current_text_handle = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let parse_fn = parse_and_validate.clone();
        Callback::from(move |_| {
            let err = parse_fn(&current_text_handle).err();
            error_setter.set(err.map(|e| e.to_string()));
        })
    };

    let clear = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |_| {
            text_setter.set(String::new());
            error_setter.set(None);
        })
    };

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
        clear,
    }
}

/// Plain text field state with an `oninput` callback.
#[hook]
pub fn use_text_input(initial: String) -> (UseStateHandle<String>, Callback<InputEvent>) {
    let text = use_state(move || initial);
    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };
    (text, oninput)
}

/// The application store provided by `App`.
#[hook]
pub fn use_store() -> AppStore {
    use_context::<AppStore>().expect("AppStore context is provided by App")
}

/// Send the user to the login screen if there is no session when the view
/// mounts. Checked once; a session that expires server-side is not noticed.
#[hook]
pub fn use_require_session() -> bool {
    let store = use_store();
    let navigator = use_navigator();
    let authenticated = store.is_authenticated();
    use_effect_with((), move |_| {
        if !authenticated {
            log::info!("no session, redirecting to login");
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Login);
            }
        }
    });
    authenticated
}

/// Load liked-recipe membership once per session.
#[hook]
pub fn use_like_sync() {
    let store = use_store();
    let should_load = store.is_authenticated() && !store.likes.is_loaded();
    use_effect_with(should_load, move |&load| {
        if load {
            let client = ApiClient::new(store.session.as_ref());
            let epoch = store.epoch;
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.liked_recipes().await;
                store.dispatch(AppAction::LikesLoaded { epoch, result });
            });
        }
    });
}

/// Create a debounced callback that cancels any previous pending call
pub fn debounce_callback<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Dropping the previous Timeout cancels it
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}
