//! Application-level configuration constants.

use once_cell::sync::Lazy;

// Backend
/// Base URL of the REST API, fixed at build time. Empty means same origin.
static API_BASE: Lazy<String> = Lazy::new(|| {
    option_env!("PANTRY_API_BASE")
        .unwrap_or("")
        .trim_end_matches('/')
        .to_string()
});

pub fn api_base() -> &'static str {
    API_BASE.as_str()
}

// Session storage keys
pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

// Matching
/// Fewest ingredients a search may be issued with. Some deployments require 3.
pub const MIN_INGREDIENTS_TO_MATCH: usize = 1;
pub const QUICK_ADD_INGREDIENTS: [&str; 8] = [
    "chicken", "rice", "tomato", "onion", "garlic", "egg", "cheese", "pasta",
];

// UI Behavior
pub const DEBOUNCE_MS: u32 = 300;
pub const INSTRUCTIONS_PREVIEW_CHARS: usize = 150;
pub const CARD_INGREDIENT_PREVIEW: usize = 3;
pub const DEFAULT_USERNAME: &str = "User";

// Min/Max limits for input fields
pub const MAX_PREP_TIME_MIN: u32 = 24 * 60;
