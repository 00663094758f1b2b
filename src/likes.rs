//! Local mirror of the user's liked recipes.
//!
//! Membership changes are applied only after the server confirms the like or
//! unlike call. A failed call leaves the set as it was.

use crate::error::ApiError;
use crate::models::{Recipe, RecipeId};
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Direction of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LikeTracker {
    liked: HashSet<RecipeId>,
    count: usize,
    pending: HashSet<RecipeId>,
    loaded: bool,
}

impl LikeTracker {
    pub fn is_liked(&self, id: RecipeId) -> bool {
        self.liked.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_pending(&self, id: RecipeId) -> bool {
        self.pending.contains(&id)
    }

    /// Replace membership with what the server reported.
    pub fn finish_load(&mut self, result: Result<Vec<Recipe>, ApiError>) {
        match result {
            Ok(recipes) => {
                self.liked = recipes.iter().map(|r| r.id).collect();
                self.count = self.liked.len();
                self.loaded = true;
                info!("loaded {} liked recipes", self.count);
            }
            Err(err) => warn!("loading liked recipes failed: {}", err),
        }
    }

    /// Which call a toggle of `id` would issue. `None` while one is in flight.
    pub fn plan_toggle(&self, id: RecipeId) -> Option<LikeAction> {
        if self.pending.contains(&id) {
            return None;
        }
        Some(if self.liked.contains(&id) {
            LikeAction::Unlike
        } else {
            LikeAction::Like
        })
    }

    pub fn start_toggle(&mut self, id: RecipeId) {
        self.pending.insert(id);
    }

    /// Apply a confirmed toggle. Ignored unless a toggle of `id` is in flight.
    pub fn finish_toggle(&mut self, id: RecipeId, action: LikeAction, result: Result<(), ApiError>) {
        if !self.pending.remove(&id) {
            debug!("dropping {:?} of recipe {}, nothing in flight", action, id);
            return;
        }
        if let Err(err) = result {
            warn!("{:?} of recipe {} failed: {}", action, id, err);
            return;
        }
        debug!("{:?} of recipe {} confirmed", action, id);
        match action {
            LikeAction::Like => {
                if self.liked.insert(id) {
                    self.count += 1;
                }
            }
            LikeAction::Unlike => {
                if self.liked.remove(&id) {
                    self.count = self.count.saturating_sub(1);
                }
            }
        }
    }
}

/// Sort order of the liked-recipes screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikedSort {
    #[default]
    Title,
    Ingredients,
    PrepTime,
}

impl LikedSort {
    pub const ALL: [LikedSort; 3] = [LikedSort::Title, LikedSort::Ingredients, LikedSort::PrepTime];

    pub fn value(&self) -> &'static str {
        match self {
            LikedSort::Title => "title",
            LikedSort::Ingredients => "ingredients",
            LikedSort::PrepTime => "prepTime",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LikedSort::Title => "Sort by Name",
            LikedSort::Ingredients => "Sort by Ingredients",
            LikedSort::PrepTime => "Sort by Prep Time",
        }
    }

    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.value() == value)
            .unwrap_or_default()
    }

    fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            LikedSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            LikedSort::Ingredients => b.ingredients.len().cmp(&a.ingredients.len()),
            LikedSort::PrepTime => a.prep_time.unwrap_or(0).cmp(&b.prep_time.unwrap_or(0)),
        }
    }
}

/// Search text, sort choice and scroll offset of the liked-recipes screen,
/// kept across navigation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LikedViewPrefs {
    pub search: String,
    pub sort: LikedSort,
    pub scroll_y: f64,
}

fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.ingredient_name.to_lowercase().contains(needle))
}

/// Recipes matching `search` by title or ingredient name, in `sort` order.
pub fn filter_and_sort(recipes: &[Recipe], search: &str, sort: LikedSort) -> Vec<Recipe> {
    let needle = search.trim().to_lowercase();
    let mut out: Vec<Recipe> = recipes
        .iter()
        .filter(|r| needle.is_empty() || matches_search(r, &needle))
        .cloned()
        .collect();
    // stable: equal keys keep server order
    out.sort_by(|a, b| sort.compare(a, b));
    out
}
