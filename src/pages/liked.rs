//! Liked recipes: search, sort, and remove with confirmation.

use super::{api_client, sign_out};
use crate::components::{ConfirmDialog, Header, LikedRecipeCard, Notice, Spinner};
use crate::hooks::{debounce_callback, use_require_session, use_store};
use crate::routes::Route;
use gloo_timers::callback::Timeout;
use log::{debug, error};
use pantry_pilot::config::DEBOUNCE_MS;
use pantry_pilot::likes::{filter_and_sort, LikeAction, LikedSort};
use pantry_pilot::store::AppAction;
use pantry_pilot::utils::pluralize;
use pantry_pilot::{Recipe, RecipeId};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LikedPage)]
pub fn liked_page() -> Html {
    let authenticated = use_require_session();
    let store = use_store();
    let navigator = use_navigator();

    let recipes = use_state(Vec::<Recipe>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let confirming = use_state(|| None::<Recipe>);
    let removing = use_state(|| false);
    let search_text = use_state(|| store.liked_view.search.clone());
    let search_timer = use_state(|| None::<Timeout>);
    let scroll_restored = use_state(|| false);

    {
        let store = store.clone();
        let recipes = recipes.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(authenticated, move |&authenticated| {
            if authenticated {
                let client = api_client(&store);
                let epoch = store.epoch;
                wasm_bindgen_futures::spawn_local(async move {
                    let result = client.liked_recipes().await;
                    match &result {
                        Ok(list) => recipes.set(list.clone()),
                        Err(e) => {
                            error!("liked recipes failed: {}", e);
                            let message = if e.is_unauthorized() {
                                "Your session has expired. Please sign in again."
                            } else {
                                "Failed to load liked recipes"
                            };
                            error.set(Some(message.to_string()));
                        }
                    }
                    store.dispatch(AppAction::LikesLoaded { epoch, result });
                    loading.set(false);
                });
            }
        });
    }

    // Return to where the user was once the list is on screen
    {
        let scroll_y = store.liked_view.scroll_y;
        let scroll_restored = scroll_restored.clone();
        use_effect_with(*loading, move |&loading| {
            if !loading && !*scroll_restored {
                scroll_restored.set(true);
                if scroll_y > 0.0 {
                    gloo_utils::window().scroll_to_with_x_and_y(0.0, scroll_y);
                }
            }
        });
    }

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            move || {
                let y = gloo_utils::window().scroll_y().unwrap_or(0.0);
                debug!("saving liked scroll offset {}", y);
                store.dispatch(AppAction::LikedScrollSaved(y));
            }
        });
    }

    let on_search = {
        let store = store.clone();
        let search_text = search_text.clone();
        let search_timer = search_timer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            search_text.set(value.clone());
            let store = store.clone();
            let apply = Callback::from(move |v: String| store.dispatch(AppAction::LikedSearchChanged(v)));
            debounce_callback(&search_timer, apply, value, DEBOUNCE_MS);
        })
    };

    let on_sort = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            store.dispatch(AppAction::LikedSortChanged(LikedSort::from_value(&select.value())));
        })
    };

    let on_open = {
        let navigator = navigator.clone();
        Callback::from(move |id: RecipeId| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Recipe { id });
            }
        })
    };

    let on_unlike = {
        let confirming = confirming.clone();
        Callback::from(move |recipe: Recipe| confirming.set(Some(recipe)))
    };

    let on_cancel = {
        let confirming = confirming.clone();
        Callback::from(move |_: ()| confirming.set(None))
    };

    let on_confirm = {
        let store = store.clone();
        let recipes = recipes.clone();
        let confirming = confirming.clone();
        let removing = removing.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let Some(recipe) = (*confirming).clone() else {
                return;
            };
            confirming.set(None);
            if *removing || store.likes.is_pending(recipe.id) {
                return;
            }
            let id = recipe.id;
            removing.set(true);
            store.dispatch(AppAction::ToggleStarted(id));

            let client = api_client(&store);
            let epoch = store.epoch;
            let store = store.clone();
            let recipes = recipes.clone();
            let removing = removing.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.unlike(id).await;
                match &result {
                    Ok(()) => {
                        recipes.set(recipes.iter().filter(|r| r.id != id).cloned().collect());
                        error.set(None);
                    }
                    Err(e) => {
                        error!("unlike {} failed: {}", id, e);
                        error.set(Some(
                            "Failed to remove recipe from favorites. Please try again.".to_string(),
                        ));
                    }
                }
                store.dispatch(AppAction::ToggleFinished {
                    epoch,
                    id,
                    action: LikeAction::Unlike,
                    result,
                });
                removing.set(false);
            });
        })
    };

    let go_matcher = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::RecipeMatcher);
            }
        })
    };

    let on_logout = {
        let store = store.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: ()| sign_out(&store, navigator.as_ref()))
    };

    if !authenticated {
        return html! {};
    }

    let view = &store.liked_view;
    let shown = filter_and_sort(&recipes, &view.search, view.sort);

    html! {
        <div class="page liked-page">
            <Header
                subtitle="Liked Recipes"
                username={store.username().map(|u| AttrValue::from(u.to_string()))}
                {on_logout}
            >
                <button class="btn-nav" onclick={go_matcher.clone()}>{ "← Back to Matcher" }</button>
            </Header>

            <main class="panel">
                <div class="panel-title">
                    <h2>{ "Your Favorite Recipes" }</h2>
                    <p>{ format!("{} saved", pluralize(recipes.len(), "recipe")) }</p>
                </div>

                if let Some(err) = &*error {
                    <Notice message={err.clone()} />
                }

                <div class="liked-controls">
                    <input
                        type="search"
                        placeholder="Search by title or ingredient..."
                        value={(*search_text).clone()}
                        oninput={on_search}
                    />
                    <select onchange={on_sort}>
                        { for LikedSort::ALL.iter().map(|s| html! {
                            <option value={s.value()} selected={*s == view.sort}>{ s.label() }</option>
                        }) }
                    </select>
                </div>

                if *loading {
                    <div class="loading"><Spinner />{ " Loading your recipes..." }</div>
                } else if recipes.is_empty() {
                    <div class="empty-state">
                        <h3>{ "No Favorite Recipes Yet" }</h3>
                        <p>{ "Like recipes on the matcher to collect them here." }</p>
                        <button class="btn-primary" onclick={go_matcher}>{ "Find Recipes" }</button>
                    </div>
                } else if shown.is_empty() {
                    <div class="empty-state">
                        <h3>{ "No Recipes Found" }</h3>
                        <p>{ "Try a different search term." }</p>
                    </div>
                } else {
                    <div class="recipe-grid">
                        { for shown.iter().map(|recipe| html! {
                            <LikedRecipeCard
                                key={recipe.id}
                                recipe={recipe.clone()}
                                on_open={on_open.clone()}
                                on_unlike={on_unlike.clone()}
                            />
                        }) }
                    </div>
                }
            </main>

            if let Some(recipe) = &*confirming {
                <ConfirmDialog
                    title="Remove from favorites?"
                    message={format!("\"{}\" will be removed from your liked recipes.", recipe.title)}
                    {on_confirm}
                    {on_cancel}
                />
            }
        </div>
    }
}
