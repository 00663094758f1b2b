//! Core of the PantryPilot web client.
//!
//! The data model, the state containers behind each screen, and the HTTP
//! client for the PantryPilot REST API. The Yew views live in the binary and
//! only dispatch into [`store::AppState`].

pub mod api;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod likes;
pub mod matcher;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;

pub use error::{ApiError, SessionError, ValidationError};
pub use models::{IngredientEntry, PrepTimeRange, Recipe, RecipeId, RecipePage, Unit};
