//! Application-wide state shared by every screen.
//!
//! Views receive the store through a Yew context and change it only by
//! dispatching [`AppAction`]s. Side effects (HTTP, browser storage) stay in
//! the views; the reducer is pure so tests can build a store in isolation.

use crate::error::{ApiError, ValidationError};
use crate::ingredients::IngredientList;
use crate::likes::{LikeAction, LikeTracker, LikedSort, LikedViewPrefs};
use crate::matcher::{MatcherNotice, MatcherState};
use crate::models::{EntryId, PrepTimeRange, Recipe, RecipeId, RecipePage, Unit};
use crate::session::Session;
use log::{debug, info};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub session: Option<Session>,
    /// Bumped on every sign-in and sign-out. Requests remember the epoch they
    /// were issued in and their results are dropped once it has moved on.
    pub epoch: u64,
    pub ingredients: IngredientList,
    /// Inline error of the add-ingredient form.
    pub ingredient_error: Option<ValidationError>,
    pub matcher: MatcherState,
    pub likes: LikeTracker,
    pub liked_view: LikedViewPrefs,
}

impl AppState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum AppAction {
    SignedIn(Session),
    SignedOut,
    AddIngredient { name: String, quantity: f64, unit: Unit },
    RejectIngredient(ValidationError),
    QuickAdd(String),
    RemoveIngredient(EntryId),
    ClearIngredients,
    SearchBlocked(MatcherNotice),
    SearchStarted(PrepTimeRange),
    SearchFinished {
        epoch: u64,
        result: Result<RecipePage, ApiError>,
    },
    LoadMoreStarted,
    LoadMoreFinished {
        epoch: u64,
        result: Result<RecipePage, ApiError>,
    },
    LikesLoaded {
        epoch: u64,
        result: Result<Vec<Recipe>, ApiError>,
    },
    ToggleStarted(RecipeId),
    ToggleFinished {
        epoch: u64,
        id: RecipeId,
        action: LikeAction,
        result: Result<(), ApiError>,
    },
    LikedSearchChanged(String),
    LikedSortChanged(LikedSort),
    LikedScrollSaved(f64),
}

impl AppAction {
    /// Epoch of the request a completion belongs to.
    fn epoch(&self) -> Option<u64> {
        match self {
            AppAction::SearchFinished { epoch, .. }
            | AppAction::LoadMoreFinished { epoch, .. }
            | AppAction::LikesLoaded { epoch, .. }
            | AppAction::ToggleFinished { epoch, .. } => Some(*epoch),
            _ => None,
        }
    }
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if let Some(epoch) = action.epoch() {
            if epoch != self.epoch {
                debug!("dropping result from session epoch {} (now {})", epoch, self.epoch);
                return self;
            }
        }
        let mut next = (*self).clone();
        match action {
            AppAction::SignedIn(session) => {
                info!("signed in as {}", session.username);
                next = AppState {
                    epoch: self.epoch + 1,
                    ..AppState::new(Some(session))
                };
            }
            AppAction::SignedOut => {
                info!("signed out");
                next = AppState {
                    epoch: self.epoch + 1,
                    ..AppState::default()
                };
            }
            AppAction::AddIngredient { name, quantity, unit } => {
                next.ingredient_error = next.ingredients.add(&name, quantity, unit).err();
            }
            AppAction::RejectIngredient(err) => next.ingredient_error = Some(err),
            AppAction::QuickAdd(name) => {
                next.ingredients.quick_add(&name);
            }
            AppAction::RemoveIngredient(id) => next.ingredients.remove(id),
            AppAction::ClearIngredients => next.ingredients.clear(),
            AppAction::SearchBlocked(notice) => next.matcher.set_notice(notice),
            AppAction::SearchStarted(range) => next.matcher.start_search(range),
            AppAction::SearchFinished { result, .. } => next.matcher.finish_search(result),
            AppAction::LoadMoreStarted => next.matcher.start_load_more(),
            AppAction::LoadMoreFinished { result, .. } => next.matcher.finish_load_more(result),
            AppAction::LikesLoaded { result, .. } => next.likes.finish_load(result),
            AppAction::ToggleStarted(id) => next.likes.start_toggle(id),
            AppAction::ToggleFinished { id, action, result, .. } => {
                next.likes.finish_toggle(id, action, result)
            }
            AppAction::LikedSearchChanged(search) => next.liked_view.search = search,
            AppAction::LikedSortChanged(sort) => next.liked_view.sort = sort,
            AppAction::LikedScrollSaved(y) => next.liked_view.scroll_y = y,
        }
        Rc::new(next)
    }
}

/// Handle views use to read and update the store.
pub type AppStore = UseReducerHandle<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce_all(state: AppState, actions: Vec<AppAction>) -> Rc<AppState> {
        actions
            .into_iter()
            .fold(Rc::new(state), |state, action| state.reduce(action))
    }

    fn session() -> Session {
        Session { token: "tok".into(), username: "sam".into() }
    }

    fn recipe(id: i64) -> Recipe {
        Recipe {
            id,
            title: format!("Recipe {}", id),
            matched_ingredients: vec![],
            prep_time: None,
            instructions: None,
            ingredients: vec![],
        }
    }

    #[test]
    fn add_sets_and_clears_inline_error() {
        let state = reduce_all(
            AppState::new(Some(session())),
            vec![AppAction::AddIngredient { name: "".into(), quantity: 2.0, unit: Unit::Pcs }],
        );
        assert_eq!(state.ingredient_error, Some(ValidationError::EmptyName));
        assert!(state.ingredients.is_empty());

        let state = state.reduce(AppAction::AddIngredient {
            name: "tomato".into(),
            quantity: 2.0,
            unit: Unit::Pcs,
        });
        assert_eq!(state.ingredient_error, None);
        assert_eq!(state.ingredients.len(), 1);
    }

    #[test]
    fn logout_resets_everything() {
        let state = reduce_all(
            AppState::new(Some(session())),
            vec![
                AppAction::QuickAdd("egg".into()),
                AppAction::SearchStarted(PrepTimeRange::default()),
                AppAction::SearchFinished {
                    epoch: 0,
                    result: Ok(RecipePage { token: Some("c".into()), recipes: vec![recipe(1)] }),
                },
                AppAction::LikesLoaded { epoch: 0, result: Ok(vec![recipe(1), recipe(2)]) },
                AppAction::LikedSearchChanged("soup".into()),
                AppAction::LikedSortChanged(LikedSort::PrepTime),
                AppAction::LikedScrollSaved(120.0),
            ],
        );
        assert_eq!(
            state.liked_view,
            LikedViewPrefs { search: "soup".into(), sort: LikedSort::PrepTime, scroll_y: 120.0 }
        );
        assert_eq!(state.likes.count(), 2);
        assert_eq!(state.matcher.recipes().len(), 1);

        let state = state.reduce(AppAction::SignedOut);
        assert_eq!(*state, AppState { epoch: 1, ..AppState::default() });
        assert!(state.session.is_none());
        assert!(state.ingredients.is_empty());
        assert!(state.matcher.recipes().is_empty());
        assert_eq!(state.likes.count(), 0);
    }

    #[test]
    fn sign_in_starts_from_clean_state() {
        let state = reduce_all(
            AppState::default(),
            vec![AppAction::QuickAdd("rice".into()), AppAction::SignedIn(session())],
        );
        assert_eq!(state.username(), Some("sam"));
        assert!(state.ingredients.is_empty());
    }

    #[test]
    fn toggle_through_store() {
        let state = reduce_all(
            AppState::new(Some(session())),
            vec![
                AppAction::ToggleStarted(4),
                AppAction::ToggleFinished {
                    epoch: 0,
                    id: 4,
                    action: LikeAction::Like,
                    result: Ok(()),
                },
            ],
        );
        assert!(state.likes.is_liked(4));
        assert_eq!(state.likes.count(), 1);
    }

    #[test]
    fn results_from_an_ended_session_are_dropped() {
        let alice = Session { token: "a".into(), username: "alice".into() };
        let bob = Session { token: "b".into(), username: "bob".into() };
        let state = reduce_all(
            AppState::default(),
            vec![
                AppAction::SignedIn(alice),
                AppAction::QuickAdd("egg".into()),
                AppAction::SearchStarted(PrepTimeRange::default()),
                AppAction::ToggleStarted(1),
            ],
        );
        let alice_epoch = state.epoch;

        let state = reduce_all(
            (*state).clone(),
            vec![
                AppAction::SignedOut,
                AppAction::SignedIn(bob),
                AppAction::SearchFinished {
                    epoch: alice_epoch,
                    result: Ok(RecipePage { token: Some("c".into()), recipes: vec![recipe(1)] }),
                },
                AppAction::LikesLoaded { epoch: alice_epoch, result: Ok(vec![recipe(1)]) },
                AppAction::ToggleFinished {
                    epoch: alice_epoch,
                    id: 1,
                    action: LikeAction::Like,
                    result: Ok(()),
                },
            ],
        );
        assert_eq!(state.username(), Some("bob"));
        assert!(state.epoch > alice_epoch);
        assert!(state.matcher.recipes().is_empty());
        assert!(!state.matcher.is_loading());
        assert!(!state.likes.is_loaded());
        assert!(!state.likes.is_liked(1));
        assert_eq!(state.likes.count(), 0);
    }

    #[test]
    fn current_epoch_results_are_applied() {
        let state = reduce_all(
            AppState::default(),
            vec![AppAction::SignedIn(session())],
        );
        let epoch = state.epoch;
        let state = state.reduce(AppAction::LikesLoaded { epoch, result: Ok(vec![recipe(3)]) });
        assert!(state.likes.is_loaded());
        assert!(state.likes.is_liked(3));
    }
}
