//! Pure Yew view components for the PantryPilot UI.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse.

use pantry_pilot::config::{CARD_INGREDIENT_PREVIEW, DEFAULT_USERNAME};
use pantry_pilot::models::{EntryId, IngredientEntry, RecipeIngredient};
use pantry_pilot::utils::{format_prep_time, format_quantity, pluralize, preview_instructions};
use pantry_pilot::{Recipe, RecipeId};
use yew::prelude::*;

/// "2 pcs tomato"
pub fn describe_amount(quantity: f64, unit: &str, name: &str) -> String {
    format!("{} {} {}", format_quantity(quantity), unit, name)
}

/// Renders ingredient pills, optionally capped at `limit` with a "+N more" tail.
pub fn render_ingredient_pills(ingredients: &[RecipeIngredient], limit: Option<usize>) -> Html {
    let shown = limit.unwrap_or(ingredients.len()).min(ingredients.len());
    let hidden = ingredients.len() - shown;

    html! {
        <div class="ingredient-pills">
            { ingredients.iter().take(shown).map(|ing| html! {
                <span class="pill">
                    { describe_amount(ing.quantity, &ing.unit, &ing.ingredient_name) }
                </span>
            }).collect::<Html>() }
            if hidden > 0 {
                <span class="pill-more">{ format!("+{} more", hidden) }</span>
            }
        </div>
    }
}

/// Top bar with the logo, a subtitle, a greeting and the page actions.
#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub subtitle: AttrValue,
    pub username: Option<AttrValue>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let name = props
        .username
        .clone()
        .unwrap_or_else(|| AttrValue::from(DEFAULT_USERNAME));
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <header class="app-header">
            <div class="brand">
                <img src="/assets/logo.png" alt="PantryPilot Logo" class="logo" />
                <div>
                    <h1>{ "PantryPilot" }</h1>
                    <p class="subtitle">{ props.subtitle.clone() }</p>
                </div>
            </div>
            <div class="header-actions">
                <span class="welcome">{ "Welcome, " }<strong>{ name }</strong></span>
                { props.children.clone() }
                <button class="btn-logout" onclick={on_logout}>{ "Logout" }</button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: AttrValue,
    #[prop_or(true)]
    pub is_error: bool,
}

#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let class = if props.is_error { "notice notice-error" } else { "notice notice-info" };
    html! { <div {class}>{ props.message.clone() }</div> }
}

#[function_component(Spinner)]
pub fn spinner() -> Html {
    html! { <span class="spinner" aria-hidden="true"></span> }
}

/// One entry of the ingredient list, with a remove button.
#[derive(Properties, PartialEq)]
pub struct IngredientChipProps {
    pub entry: IngredientEntry,
    pub on_remove: Callback<EntryId>,
}

#[function_component(IngredientChip)]
pub fn ingredient_chip(props: &IngredientChipProps) -> Html {
    let entry = &props.entry;
    let onclick = {
        let id = entry.id;
        props.on_remove.reform(move |_: MouseEvent| id)
    };
    html! {
        <div class="ingredient-chip">
            <span>{ describe_amount(entry.quantity, entry.unit.as_str(), &entry.ingredient_name) }</span>
            <button class="chip-remove" title="Remove" {onclick}>{ "×" }</button>
        </div>
    }
}

/// A matched recipe on the matcher screen.
#[derive(Properties, PartialEq)]
pub struct RecipeCardProps {
    pub recipe: Recipe,
    pub liked: bool,
    pub like_pending: bool,
    pub on_toggle_like: Callback<RecipeId>,
    pub on_open: Callback<RecipeId>,
}

#[function_component(RecipeCard)]
pub fn recipe_card(props: &RecipeCardProps) -> Html {
    let recipe = &props.recipe;
    let id = recipe.id;
    let on_open = props.on_open.reform(move |_: MouseEvent| id);
    let on_like = props.on_toggle_like.reform(move |e: MouseEvent| {
        e.stop_propagation();
        id
    });
    let matched = &recipe.matched_ingredients;

    html! {
        <div class="recipe-card" onclick={on_open}>
            <div class="recipe-card-head">
                <h4>{ recipe.title.clone() }</h4>
                <button
                    class={classes!("btn-like", props.liked.then_some("liked"))}
                    title={if props.liked { "Remove from favorites" } else { "Add to favorites" }}
                    disabled={props.like_pending}
                    onclick={on_like}
                >
                    { if props.liked { "♥" } else { "♡" } }
                </button>
            </div>
            if recipe.prep_time.is_some() {
                <div class="prep-time">{ format_prep_time(recipe.prep_time) }</div>
            }
            if !matched.is_empty() {
                <div>
                    <p class="matched-label">
                        { format!("Matching ingredients ({}):", matched.len()) }
                    </p>
                    { render_ingredient_pills(matched, None) }
                </div>
            }
        </div>
    }
}

/// A saved recipe on the liked-recipes screen.
#[derive(Properties, PartialEq)]
pub struct LikedRecipeCardProps {
    pub recipe: Recipe,
    pub on_open: Callback<RecipeId>,
    pub on_unlike: Callback<Recipe>,
}

#[function_component(LikedRecipeCard)]
pub fn liked_recipe_card(props: &LikedRecipeCardProps) -> Html {
    let recipe = &props.recipe;
    let id = recipe.id;
    let on_open = props.on_open.reform(move |_: MouseEvent| id);
    let on_unlike = {
        let recipe = recipe.clone();
        props.on_unlike.reform(move |e: MouseEvent| {
            e.stop_propagation();
            recipe.clone()
        })
    };

    html! {
        <div class="recipe-card liked" onclick={on_open}>
            <button class="btn-unlike" title="Remove from favorites" onclick={on_unlike}>{ "🗑" }</button>
            <h4>{ recipe.title.clone() }</h4>
            <div class="prep-time">{ format_prep_time(recipe.prep_time) }</div>
            if let Some(text) = recipe.instructions.as_deref() {
                <p class="instructions-preview">{ preview_instructions(text) }</p>
            }
            if !recipe.ingredients.is_empty() {
                <div class="ingredient-summary">
                    <span>{ pluralize(recipe.ingredients.len(), "ingredient") }</span>
                    { render_ingredient_pills(&recipe.ingredients, Some(CARD_INGREDIENT_PREVIEW)) }
                </div>
            }
            <p class="click-hint">{ "Click to view details →" }</p>
        </div>
    }
}

/// Full-size ingredient image over the page.
#[derive(Properties, PartialEq)]
pub struct ImageModalProps {
    pub ingredient: RecipeIngredient,
    pub on_close: Callback<()>,
}

#[function_component(ImageModal)]
pub fn image_modal(props: &ImageModalProps) -> Html {
    let ing = &props.ingredient;
    let Some(url) = ing.image() else {
        return html! {};
    };
    html! {
        <div class="modal-backdrop">
            <div class="modal image-modal">
                <button class="modal-close" onclick={props.on_close.reform(|_: MouseEvent| ())}>{ "×" }</button>
                <img src={url.to_string()} alt={ing.ingredient_name.clone()} />
                <h3>{ ing.ingredient_name.clone() }</h3>
                <p>{ format!("{} {}", format_quantity(ing.quantity), ing.unit) }</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <h3>{ props.title.clone() }</h3>
                <p>{ props.message.clone() }</p>
                <div class="modal-actions">
                    <button class="btn-secondary" onclick={props.on_cancel.reform(|_: MouseEvent| ())}>
                        { "Cancel" }
                    </button>
                    <button class="btn-danger" onclick={props.on_confirm.reform(|_: MouseEvent| ())}>
                        { "Remove" }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_read_naturally() {
        assert_eq!(describe_amount(2.0, "pcs", "tomato"), "2 pcs tomato");
        assert_eq!(describe_amount(0.25, "kg", "flour"), "0.25 kg flour");
    }
}
