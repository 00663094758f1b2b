use super::{api_client, sign_out, toggle_like};
use crate::components::{describe_amount, Header, ImageModal, Notice, Spinner};
use crate::hooks::{use_like_sync, use_require_session, use_store};
use crate::routes::Route;
use log::error;
use pantry_pilot::models::RecipeIngredient;
use pantry_pilot::utils::{format_prep_time, instruction_steps, pluralize};
use pantry_pilot::{Recipe, RecipeId};
use std::collections::HashSet;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecipeDetailProps {
    pub id: RecipeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum IngredientLayout {
    #[default]
    Grid,
    List,
}

#[function_component(RecipeDetailPage)]
pub fn recipe_detail_page(props: &RecipeDetailProps) -> Html {
    let authenticated = use_require_session();
    use_like_sync();
    let store = use_store();
    let navigator = use_navigator();

    let recipe = use_state(|| None::<Recipe>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let checked = use_state(HashSet::<String>::new);
    let layout = use_state(IngredientLayout::default);
    let enlarged = use_state(|| None::<RecipeIngredient>);

    {
        let store = store.clone();
        let recipe = recipe.clone();
        let loading = loading.clone();
        let error = error.clone();
        let checked = checked.clone();
        use_effect_with((props.id, authenticated), move |&(id, authenticated)| {
            if authenticated {
                loading.set(true);
                checked.set(HashSet::new());
                let client = api_client(&store);
                wasm_bindgen_futures::spawn_local(async move {
                    match client.recipe(id).await {
                        Ok(found) => {
                            recipe.set(Some(found));
                            error.set(None);
                        }
                        Err(e) => {
                            error!("recipe {} failed: {}", id, e);
                            error.set(Some("Failed to load recipe. Please try again.".to_string()));
                        }
                    }
                    loading.set(false);
                });
            }
        });
    }

    let on_toggle_checked = {
        let checked = checked.clone();
        Callback::from(move |key: String| {
            let mut next = (*checked).clone();
            if !next.remove(&key) {
                next.insert(key);
            }
            checked.set(next);
        })
    };

    let on_enlarge = {
        let enlarged = enlarged.clone();
        Callback::from(move |ing: RecipeIngredient| enlarged.set(Some(ing)))
    };

    let on_close_image = {
        let enlarged = enlarged.clone();
        Callback::from(move |_: ()| enlarged.set(None))
    };

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.back();
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

    let header = html! {
        <Header
            subtitle="Recipe Details"
            username={store.username().map(|u| AttrValue::from(u.to_string()))}
            {on_logout}
        >
            <button class="btn-nav" onclick={on_back.clone()}>{ "← Back" }</button>
        </Header>
    };

    let body = if *loading {
        html! { <div class="loading"><Spinner />{ " Loading recipe..." }</div> }
    } else if let Some(err) = &*error {
        html! {
            <>
                <Notice message={err.clone()} />
                <button class="btn-secondary" onclick={
                    let navigator = navigator.clone();
                    Callback::from(move |_: MouseEvent| {
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::RecipeMatcher);
                        }
                    })
                }>
                    { "Back to Matcher" }
                </button>
            </>
        }
    } else if let Some(recipe) = &*recipe {
        let id = recipe.id;
        let liked = store.likes.is_liked(id);
        let on_like = {
            let store = store.clone();
            Callback::from(move |_: MouseEvent| toggle_like(&store, id))
        };
        let done = recipe
            .ingredients
            .iter()
            .filter(|i| checked.contains(&i.key()))
            .count();

        html! {
            <article class="recipe-detail">
                <div class="recipe-detail-head">
                    <h2>{ recipe.title.clone() }</h2>
                    <button
                        class={classes!("btn-like", liked.then_some("liked"))}
                        disabled={store.likes.is_pending(id)}
                        onclick={on_like}
                    >
                        { if liked { "♥ Liked" } else { "♡ Like" } }
                    </button>
                </div>
                <div class="recipe-meta">
                    <span class="prep-time">{ format_prep_time(recipe.prep_time) }</span>
                    <span>{ pluralize(recipe.ingredients.len(), "ingredient") }</span>
                </div>

                <section class="recipe-ingredients">
                    <div class="section-head">
                        <h3>{ format!("Ingredients ({}/{} ready)", done, recipe.ingredients.len()) }</h3>
                        <div class="layout-toggle">
                            { layout_button(&layout, IngredientLayout::Grid, "Grid") }
                            { layout_button(&layout, IngredientLayout::List, "List") }
                        </div>
                    </div>
                    <ul class={classes!("ingredients", match *layout {
                        IngredientLayout::Grid => "grid",
                        IngredientLayout::List => "list",
                    })}>
                        { for recipe.ingredients.iter().map(|ing| {
                            render_ingredient(ing, checked.contains(&ing.key()), &on_toggle_checked, &on_enlarge)
                        }) }
                    </ul>
                </section>

                <section class="recipe-instructions">
                    <h3>{ "Instructions" }</h3>
                    { match instruction_steps(recipe.instructions.as_deref().unwrap_or_default()) {
                        steps if steps.is_empty() => html! {
                            <p class="muted">{ "No instructions available." }</p>
                        },
                        steps => html! {
                            <ol>
                                { for steps.into_iter().map(|step| html! { <li>{ step }</li> }) }
                            </ol>
                        },
                    } }
                </section>
            </article>
        }
    } else {
        html! {}
    };

    html! {
        <div class="page detail-page">
            { header }
            <main class="panel">{ body }</main>
            if let Some(ing) = &*enlarged {
                <ImageModal ingredient={ing.clone()} on_close={on_close_image} />
            }
        </div>
    }
}

fn layout_button(layout: &UseStateHandle<IngredientLayout>, value: IngredientLayout, label: &'static str) -> Html {
    let onclick = {
        let layout = layout.clone();
        Callback::from(move |_: MouseEvent| layout.set(value))
    };
    html! {
        <button class={classes!("btn-toggle", (**layout == value).then_some("active"))} {onclick}>
            { label }
        </button>
    }
}

fn render_ingredient(
    ing: &RecipeIngredient,
    is_checked: bool,
    on_toggle: &Callback<String>,
    on_enlarge: &Callback<RecipeIngredient>,
) -> Html {
    let onclick = {
        let key = ing.key();
        on_toggle.reform(move |_: MouseEvent| key.clone())
    };
    let on_view = {
        let ing = ing.clone();
        on_enlarge.reform(move |e: MouseEvent| {
            e.stop_propagation();
            ing.clone()
        })
    };
    html! {
        <li key={ing.key()} class={classes!("ingredient", is_checked.then_some("checked"))} {onclick}>
            if let Some(url) = ing.image() {
                <img src={url.to_string()} alt={ing.ingredient_name.clone()} />
                <button class="btn-view" title="Enlarge image" onclick={on_view}>{ "🔍" }</button>
            }
            <input type="checkbox" checked={is_checked} />
            <span>{ describe_amount(ing.quantity, &ing.unit, &ing.ingredient_name) }</span>
        </li>
    }
}
