//! Matcher screen: build the ingredient list, search, page through results.

use super::pantry::PantryPanel;
use super::{api_client, sign_out, toggle_like};
use crate::components::{Header, IngredientChip, Notice, RecipeCard, Spinner};
use crate::hooks::{use_like_sync, use_require_session, use_store, use_text_input, use_validated_input};
use crate::routes::Route;
use pantry_pilot::config::QUICK_ADD_INGREDIENTS;
use pantry_pilot::ingredients::parse_entry;
use pantry_pilot::matcher::{MatcherNotice, SearchPlan};
use pantry_pilot::models::PantryItem;
use pantry_pilot::store::AppAction;
use pantry_pilot::utils::{parse_prep_bound, parse_prep_time_range, parse_quantity, pluralize};
use pantry_pilot::{RecipeId, Unit, ValidationError};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

type BoundParser = Rc<dyn Fn(&str) -> Result<Option<u32>, ValidationError>>;

#[function_component(MatcherPage)]
pub fn matcher_page() -> Html {
    let authenticated = use_require_session();
    use_like_sync();
    let store = use_store();
    let navigator = use_navigator();

    let (name, on_name) = use_text_input(String::new());
    let parse_qty: Rc<dyn Fn(&str) -> Result<f64, ValidationError>> = Rc::new(parse_quantity);
    let quantity = use_validated_input(parse_qty);
    let unit = use_state(Unit::default);
    let parse_min: BoundParser = Rc::new(|s: &str| parse_prep_bound(s, "Minimum prep time"));
    let min_prep = use_validated_input(parse_min);
    let parse_max: BoundParser = Rc::new(|s: &str| parse_prep_bound(s, "Maximum prep time"));
    let max_prep = use_validated_input(parse_max);

    let add_ingredient = {
        let store = store.clone();
        let name = name.clone();
        let quantity = quantity.clone();
        let unit = unit.clone();
        Callback::from(move |_: ()| {
            let qty = match parse_entry(&name, &quantity.text) {
                Ok(q) => q,
                Err(e) => {
                    store.dispatch(AppAction::RejectIngredient(e));
                    return;
                }
            };
            store.dispatch(AppAction::AddIngredient {
                name: (*name).clone(),
                quantity: qty,
                unit: *unit,
            });
            name.set(String::new());
            quantity.clear.emit(());
            unit.set(Unit::default());
        })
    };

    let on_enter = {
        let add_ingredient = add_ingredient.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                add_ingredient.emit(());
            }
        })
    };

    let on_unit = {
        let unit = unit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            unit.set(select.value().parse().unwrap_or_default());
        })
    };

    let on_remove = {
        let store = store.clone();
        Callback::from(move |id| store.dispatch(AppAction::RemoveIngredient(id)))
    };

    let on_use_pantry_item = {
        let store = store.clone();
        Callback::from(move |item: PantryItem| {
            store.dispatch(AppAction::AddIngredient {
                name: item.ingredient_name,
                quantity: item.quantity,
                unit: item.unit,
            })
        })
    };

    let find_recipes = {
        let store = store.clone();
        let min_text = min_prep.text.clone();
        let max_text = max_prep.text.clone();
        Callback::from(move |_: MouseEvent| {
            let range = match parse_prep_time_range(&min_text, &max_text) {
                Ok(r) => r,
                Err(e) => {
                    store.dispatch(AppAction::SearchBlocked(MatcherNotice::Invalid(e)));
                    return;
                }
            };
            let request = match store.matcher.plan_search(&store.ingredients, range) {
                SearchPlan::Busy => return,
                SearchPlan::Blocked(notice) => {
                    store.dispatch(AppAction::SearchBlocked(notice));
                    return;
                }
                SearchPlan::Request(request) => request,
            };
            store.dispatch(AppAction::SearchStarted(range));

            let client = api_client(&store);
            let epoch = store.epoch;
            let store = store.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.match_recipes(&request).await;
                store.dispatch(AppAction::SearchFinished { epoch, result });
            });
        })
    };

    let load_more = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(token) = store.matcher.plan_load_more() else {
                return;
            };
            store.dispatch(AppAction::LoadMoreStarted);

            let client = api_client(&store);
            let epoch = store.epoch;
            let store = store.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.next_recipes(&token).await;
                store.dispatch(AppAction::LoadMoreFinished { epoch, result });
            });
        })
    };

    let on_toggle_like = {
        let store = store.clone();
        Callback::from(move |id: RecipeId| toggle_like(&store, id))
    };

    let on_open = {
        let navigator = navigator.clone();
        Callback::from(move |id: RecipeId| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Recipe { id });
            }
        })
    };

    let on_logout = {
        let store = store.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: ()| sign_out(&store, navigator.as_ref()))
    };

    let go_liked = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::LikedRecipes);
            }
        })
    };

    if !authenticated {
        return html! {};
    }

    let matcher = &store.matcher;
    let entries = store.ingredients.entries();
    let loading = matcher.is_loading();

    html! {
        <div class="page matcher-page">
            <Header
                subtitle="Recipe Matcher"
                username={store.username().map(|u| AttrValue::from(u.to_string()))}
                {on_logout}
            >
                <button class="btn-nav" onclick={go_liked}>
                    { format!("♥ Liked ({})", store.likes.count()) }
                </button>
            </Header>

            <main class="panel">
                <div class="panel-title">
                    <h2>{ "Recipe Matcher" }</h2>
                    <p>{ "Turn your ingredients into delicious recipes" }</p>
                </div>

                <section class="ingredient-form">
                    if let Some(err) = &store.ingredient_error {
                        <Notice message={err.to_string()} />
                    }
                    <div class="form-row">
                        <input
                            type="text"
                            placeholder="Enter ingredient name..."
                            value={(*name).clone()}
                            oninput={on_name}
                            onkeypress={on_enter.clone()}
                        />
                        <input
                            type="number"
                            placeholder="Qty"
                            min="0"
                            step="any"
                            class={classes!("qty", quantity.error.is_some().then_some("invalid"))}
                            value={quantity.text.clone()}
                            oninput={quantity.on_text_input.clone()}
                            onchange={quantity.on_commit.reform(|_| ())}
                            onkeypress={on_enter}
                        />
                        <select onchange={on_unit}>
                            { for Unit::ALL.iter().map(|u| html! {
                                <option value={u.as_str()} selected={*u == *unit}>{ u.as_str() }</option>
                            }) }
                        </select>
                    </div>
                    if let Some(err) = &quantity.error {
                        <div class="input-error">{ err }</div>
                    }
                    <div class="form-actions">
                        <button class="btn-add" onclick={add_ingredient.reform(|_: MouseEvent| ())}>
                            { "+ Add Ingredient" }
                        </button>
                        <button class="btn-clear" onclick={
                            let store = store.clone();
                            Callback::from(move |_: MouseEvent| store.dispatch(AppAction::ClearIngredients))
                        }>
                            { "Clear All" }
                        </button>
                    </div>
                </section>

                <section class="quick-add">
                    <h3>{ "Quick Add Popular Items" }</h3>
                    <div class="quick-add-buttons">
                        { for QUICK_ADD_INGREDIENTS.iter().map(|&item| {
                            let store = store.clone();
                            html! {
                                <button class="btn-quick"
                                    onclick={Callback::from(move |_: MouseEvent| {
                                        store.dispatch(AppAction::QuickAdd(item.to_string()))
                                    })}
                                >
                                    { item }
                                </button>
                            }
                        }) }
                    </div>
                </section>

                <PantryPanel on_use={on_use_pantry_item} />

                <section class="ingredient-list">
                    <div class="count">{ format!("{} added", pluralize(entries.len(), "ingredient")) }</div>
                    if entries.is_empty() {
                        <div class="empty-hint">{ "Start adding ingredients to find matching recipes" }</div>
                    } else {
                        <div class="chips">
                            { for entries.iter().map(|entry| html! {
                                <IngredientChip key={entry.id} entry={entry.clone()} on_remove={on_remove.clone()} />
                            }) }
                        </div>
                    }
                </section>

                <section class="prep-filter">
                    <label>{ "Prep time (minutes):" }</label>
                    <input
                        type="number"
                        min="0"
                        placeholder="min"
                        value={min_prep.text.clone()}
                        oninput={min_prep.on_text_input.clone()}
                        onchange={min_prep.on_commit.reform(|_| ())}
                    />
                    <input
                        type="number"
                        min="0"
                        placeholder="max"
                        value={max_prep.text.clone()}
                        oninput={max_prep.on_text_input.clone()}
                        onchange={max_prep.on_commit.reform(|_| ())}
                    />
                    if let Some(err) = min_prep.error.as_ref().or(max_prep.error.as_ref()) {
                        <div class="input-error">{ err }</div>
                    }
                </section>

                <button class="btn-find" onclick={find_recipes} disabled={loading}>
                    if loading {
                        <><Spinner />{ " Finding Recipes..." }</>
                    } else {
                        { "Find Recipes" }
                    }
                </button>

                if let Some(notice) = matcher.notice() {
                    <Notice message={notice.to_string()} is_error={notice.is_error()} />
                }

                if !matcher.recipes().is_empty() {
                    <section class="results">
                        <h3>{ "Matched Recipes" }</h3>
                        <div class="recipe-grid">
                            { for matcher.recipes().iter().enumerate().map(|(idx, recipe)| html! {
                                // pages may repeat a recipe, so key by position
                                <RecipeCard
                                    key={idx}
                                    recipe={recipe.clone()}
                                    liked={store.likes.is_liked(recipe.id)}
                                    like_pending={store.likes.is_pending(recipe.id)}
                                    on_toggle_like={on_toggle_like.clone()}
                                    on_open={on_open.clone()}
                                />
                            }) }
                        </div>
                        if matcher.token().is_some() && !matcher.is_exhausted() {
                            <div class="load-more">
                                <button class="btn-more" onclick={load_more} disabled={loading}>
                                    { if loading { "Loading..." } else { "+ Load More Recipes" } }
                                </button>
                            </div>
                        }
                    </section>
                }
            </main>
        </div>
    }
}
