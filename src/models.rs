//! Wire and domain types shared by the API client and the state containers.
//!
//! Every type that crosses the network boundary is an explicit serde record.
//! Required fields fail decoding when missing; optional ones default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type RecipeId = i64;
pub type EntryId = u64;

/// Unit a pantry quantity is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Pcs,
    G,
    Kg,
    Ml,
    L,
    Tbsp,
    Litre,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Pcs,
        Unit::G,
        Unit::Kg,
        Unit::Ml,
        Unit::L,
        Unit::Tbsp,
        Unit::Litre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pcs => "pcs",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Tbsp => "tbsp",
            Unit::Litre => "litre",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown unit: {}", s))
    }
}

/// One row of the matcher's session-local ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    pub id: EntryId,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// An ingredient as the backend reports it inside a recipe.
///
/// Units are kept as free text here: recipes come from an external catalogue
/// whose units are not restricted to the editor's set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    #[serde(default)]
    pub id: Option<i64>,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

const IMAGE_PLACEHOLDER: &str = "Image not available";

impl RecipeIngredient {
    /// Image url if the backend supplied a real one.
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty() && *url != IMAGE_PLACEHOLDER)
    }

    /// Stable key for local per-ingredient UI state.
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.ingredient_name.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub matched_ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

/// A page of matching recipes plus the cursor for the next page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipePage {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Inclusive prep-time bounds in minutes. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrepTimeRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl PrepTimeRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Recipes without a prep time only pass an unbounded range.
    pub fn contains(&self, recipe: &Recipe) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(minutes) = recipe.prep_time else {
            return false;
        };
        self.min.map_or(true, |min| minutes >= min) && self.max.map_or(true, |max| minutes <= max)
    }
}

/// The ingredient payload sent for matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchIngredient {
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Unit,
}

impl From<&IngredientEntry> for MatchIngredient {
    fn from(entry: &IngredientEntry) -> Self {
        Self {
            ingredient_name: entry.ingredient_name.clone(),
            quantity: entry.quantity,
            unit: entry.unit,
        }
    }
}

/// Body of `POST /api/matching-recipes`.
///
/// The backend accepts a bare array, or an object when prep-time bounds apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchRequest {
    Plain(Vec<MatchIngredient>),
    #[serde(rename_all = "camelCase")]
    Bounded {
        ingredients: Vec<MatchIngredient>,
        min_prep_time: Option<u32>,
        max_prep_time: Option<u32>,
    },
}

impl MatchRequest {
    pub fn new(entries: &[IngredientEntry], range: PrepTimeRange) -> Self {
        let ingredients = entries.iter().map(MatchIngredient::from).collect();
        if range.is_unbounded() {
            MatchRequest::Plain(ingredients)
        } else {
            MatchRequest::Bounded {
                ingredients,
                min_prep_time: range.min,
                max_prep_time: range.max,
            }
        }
    }
}

/// A record of the server-side pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Unit,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response of the login/register endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
