//! The server-side pantry, shown beside the matcher's ingredient list.

use super::api_client;
use crate::components::{describe_amount, Notice};
use crate::hooks::{use_store, use_text_input, use_validated_input};
use log::warn;
use pantry_pilot::ingredients::parse_entry;
use pantry_pilot::models::PantryItem;
use pantry_pilot::utils::parse_quantity;
use pantry_pilot::{Unit, ValidationError};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PantryPanelProps {
    /// Copy a pantry record into the ingredient list.
    pub on_use: Callback<PantryItem>,
}

#[function_component(PantryPanel)]
pub fn pantry_panel(props: &PantryPanelProps) -> Html {
    let store = use_store();
    let items = use_state(Vec::<PantryItem>::new);
    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let expanded = use_state(|| false);

    let (name, on_name) = use_text_input(String::new());
    let parse_qty: Rc<dyn Fn(&str) -> Result<f64, ValidationError>> = Rc::new(parse_quantity);
    let quantity = use_validated_input(parse_qty);
    let unit = use_state(Unit::default);

    // Load the pantry the first time the panel is opened
    {
        let client = api_client(&store);
        let items = items.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(*expanded, move |&open| {
            if open && items.is_empty() {
                loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    match client.pantry_items().await {
                        Ok(list) => {
                            items.set(list);
                            error.set(None);
                        }
                        Err(e) => {
                            warn!("pantry load failed: {}", e);
                            error.set(Some("Failed to fetch pantry ingredients".to_string()));
                        }
                    }
                    loading.set(false);
                });
            }
        });
    }

    let on_submit = {
        let client = api_client(&store);
        let items = items.clone();
        let saving = saving.clone();
        let error = error.clone();
        let name = name.clone();
        let quantity = quantity.clone();
        let unit = unit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let qty = match parse_entry(&name, &quantity.text) {
                Ok(q) => q,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let item = PantryItem {
                id: None,
                ingredient_name: name.trim().to_string(),
                quantity: qty,
                unit: *unit,
            };
            saving.set(true);
            error.set(None);

            let client = client.clone();
            let items = items.clone();
            let saving = saving.clone();
            let error = error.clone();
            let name = name.clone();
            let clear_quantity = quantity.clear.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.add_pantry_item(&item).await {
                    Ok(created) => {
                        let mut list = (*items).clone();
                        list.push(created);
                        items.set(list);
                        name.set(String::new());
                        clear_quantity.emit(());
                    }
                    Err(e) => {
                        warn!("pantry add failed: {}", e);
                        error.set(Some("Failed to add ingredient".to_string()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_unit = {
        let unit = unit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            unit.set(select.value().parse().unwrap_or_default());
        })
    };

    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    html! {
        <section class="pantry-panel">
            <button class="btn-secondary" onclick={toggle}>
                { if *expanded { "Hide My Pantry" } else { "Show My Pantry" } }
            </button>
            if *expanded {
                if let Some(err) = &*error {
                    <Notice message={err.clone()} />
                }
                <form class="pantry-form" onsubmit={on_submit}>
                    <input type="text" placeholder="Ingredient"
                        value={(*name).clone()} oninput={on_name} />
                    <input type="number" placeholder="Qty" step="any"
                        value={quantity.text.clone()}
                        oninput={quantity.on_text_input.clone()}
                        onchange={quantity.on_commit.reform(|_| ())} />
                    <select onchange={on_unit}>
                        { for Unit::ALL.iter().map(|u| html! {
                            <option value={u.as_str()} selected={*u == *unit}>{ u.as_str() }</option>
                        }) }
                    </select>
                    <button type="submit" disabled={*saving}>
                        { if *saving { "Adding..." } else { "Add to Pantry" } }
                    </button>
                </form>
                if *loading {
                    <p class="muted">{ "Loading pantry..." }</p>
                } else if items.is_empty() {
                    <p class="muted">{ "Your pantry is empty" }</p>
                } else {
                    <ul class="pantry-items">
                        { for items.iter().map(|item| {
                            let on_use = {
                                let item = item.clone();
                                props.on_use.reform(move |_: MouseEvent| item.clone())
                            };
                            html! {
                                <li>
                                    <span>{ describe_amount(item.quantity, item.unit.as_str(), &item.ingredient_name) }</span>
                                    <button class="btn-quick" onclick={on_use}>{ "Use" }</button>
                                </li>
                            }
                        }) }
                    </ul>
                }
            }
        </section>
    }
}
