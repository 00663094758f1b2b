//! Recipe matching state: accumulated result pages, the continuation token
//! and the informational notices shown under the search button.
//!
//! Network calls happen outside this type. A search or page fetch is split
//! into a pure *plan* (what to send, or why nothing is sent), a *start*
//! transition that marks the request in flight, and a *finish* transition
//! that applies the response.
//!
//! Pages are appended exactly as received. Overlap between pages is the
//! backend's concern and is not deduplicated here.

use crate::config::MIN_INGREDIENTS_TO_MATCH;
use crate::error::{ApiError, ValidationError};
use crate::ingredients::IngredientList;
use crate::models::{MatchRequest, PrepTimeRange, Recipe, RecipePage};
use log::{debug, info, warn};
use std::fmt;

/// Informational or error message for the matcher screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherNotice {
    NeedIngredients { min: usize },
    NoRecipesFound,
    NoMoreRecipes,
    SearchFailed,
    LoadMoreFailed,
    Invalid(ValidationError),
}

impl fmt::Display for MatcherNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherNotice::NeedIngredients { min } if *min <= 1 => {
                write!(f, "Add at least one ingredient")
            }
            MatcherNotice::NeedIngredients { min } => {
                write!(f, "Add at least {} ingredients", min)
            }
            MatcherNotice::NoRecipesFound => write!(f, "No recipes found"),
            MatcherNotice::NoMoreRecipes => write!(f, "No more recipes"),
            MatcherNotice::SearchFailed => write!(f, "Failed to fetch recipes"),
            MatcherNotice::LoadMoreFailed => write!(f, "Failed to load more recipes"),
            MatcherNotice::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl MatcherNotice {
    /// Empty-result notices are informational, not failures.
    pub fn is_error(&self) -> bool {
        !matches!(self, MatcherNotice::NoRecipesFound | MatcherNotice::NoMoreRecipes)
    }
}

/// Outcome of planning a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    /// A request is already in flight.
    Busy,
    /// Nothing may be sent; show the notice instead.
    Blocked(MatcherNotice),
    Request(MatchRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatcherState {
    recipes: Vec<Recipe>,
    token: Option<String>,
    range: PrepTimeRange,
    notice: Option<MatcherNotice>,
    loading: bool,
    exhausted: bool,
    min_ingredients: usize,
}

impl Default for MatcherState {
    fn default() -> Self {
        Self::with_min_ingredients(MIN_INGREDIENTS_TO_MATCH)
    }
}

impl MatcherState {
    pub fn with_min_ingredients(min_ingredients: usize) -> Self {
        Self {
            recipes: Vec::new(),
            token: None,
            range: PrepTimeRange::default(),
            notice: None,
            loading: false,
            exhausted: false,
            min_ingredients: min_ingredients.max(1),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn notice(&self) -> Option<&MatcherNotice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn can_load_more(&self) -> bool {
        self.token.is_some() && !self.exhausted && !self.loading
    }

    pub fn set_notice(&mut self, notice: MatcherNotice) {
        self.notice = Some(notice);
    }

    /// Decide what a search for `ingredients` would send, without changing state.
    pub fn plan_search(&self, ingredients: &IngredientList, range: PrepTimeRange) -> SearchPlan {
        if self.loading {
            return SearchPlan::Busy;
        }
        if ingredients.len() < self.min_ingredients {
            return SearchPlan::Blocked(MatcherNotice::NeedIngredients {
                min: self.min_ingredients,
            });
        }
        SearchPlan::Request(MatchRequest::new(ingredients.entries(), range))
    }

    /// Drop previous results and mark a search in flight.
    pub fn start_search(&mut self, range: PrepTimeRange) {
        self.recipes.clear();
        self.token = None;
        self.notice = None;
        self.exhausted = false;
        self.range = range;
        self.loading = true;
    }

    /// Apply the result of the search in flight. Ignored when none is.
    pub fn finish_search(&mut self, result: Result<RecipePage, ApiError>) {
        if !self.loading {
            debug!("dropping search result, no search in flight");
            return;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                info!("search returned {} recipes", page.recipes.len());
                if page.recipes.is_empty() {
                    self.notice = Some(MatcherNotice::NoRecipesFound);
                }
                self.token = page.token;
                self.recipes = page.recipes;
            }
            Err(err) => {
                warn!("recipe search failed: {}", err);
                self.notice = Some(MatcherNotice::SearchFailed);
            }
        }
    }

    /// Token to request the next page with, if another page may be fetched.
    pub fn plan_load_more(&self) -> Option<String> {
        if self.can_load_more() {
            self.token.clone()
        } else {
            None
        }
    }

    pub fn start_load_more(&mut self) {
        self.loading = true;
    }

    /// Append the next page, filtered by the prep-time range of the search.
    ///
    /// A page that contributes nothing ends pagination for this search.
    pub fn finish_load_more(&mut self, result: Result<RecipePage, ApiError>) {
        if !self.loading {
            debug!("dropping page, no request in flight");
            return;
        }
        self.loading = false;
        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!("loading more recipes failed: {}", err);
                self.notice = Some(MatcherNotice::LoadMoreFailed);
                return;
            }
        };

        if let Some(token) = page.token {
            self.token = Some(token);
        }
        let range = self.range;
        let fresh: Vec<Recipe> = page
            .recipes
            .into_iter()
            .filter(|r| range.contains(r))
            .collect();
        if fresh.is_empty() {
            debug!("next page was empty after filtering, pagination finished");
            self.notice = Some(MatcherNotice::NoMoreRecipes);
            self.exhausted = true;
            return;
        }
        debug!("appending {} recipes", fresh.len());
        self.notice = None;
        self.recipes.extend(fresh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, prep_time: Option<u32>) -> Recipe {
        Recipe {
            id,
            title: format!("Recipe {}", id),
            matched_ingredients: vec![],
            prep_time,
            instructions: None,
            ingredients: vec![],
        }
    }

    fn page(token: Option<&str>, recipes: Vec<Recipe>) -> RecipePage {
        RecipePage {
            token: token.map(String::from),
            recipes,
        }
    }

    fn two_ingredients() -> IngredientList {
        let mut list = IngredientList::new();
        list.quick_add("egg");
        list.quick_add("rice");
        list
    }

    /// Plan then start, as the matcher screen does through the store.
    fn search(
        state: &mut MatcherState,
        list: &IngredientList,
        range: PrepTimeRange,
    ) -> Option<MatchRequest> {
        match state.plan_search(list, range) {
            SearchPlan::Busy => None,
            SearchPlan::Blocked(notice) => {
                state.set_notice(notice);
                None
            }
            SearchPlan::Request(request) => {
                state.start_search(range);
                Some(request)
            }
        }
    }

    fn load_more(state: &mut MatcherState) -> Option<String> {
        let token = state.plan_load_more()?;
        state.start_load_more();
        Some(token)
    }

    fn transport_error() -> ApiError {
        ApiError::Transport {
            endpoint: "/api/matching-recipes".into(),
            message: "offline".into(),
        }
    }

    #[test]
    fn empty_list_never_produces_a_request() {
        let mut state = MatcherState::default();
        let request = search(&mut state, &IngredientList::new(), PrepTimeRange::default());
        assert!(request.is_none());
        assert!(!state.is_loading());
        assert_eq!(state.notice(), Some(&MatcherNotice::NeedIngredients { min: 1 }));
        assert_eq!(state.notice().unwrap().to_string(), "Add at least one ingredient");
    }

    #[test]
    fn configured_minimum_is_enforced() {
        let mut state = MatcherState::with_min_ingredients(3);
        assert!(search(&mut state, &two_ingredients(), PrepTimeRange::default()).is_none());
        assert_eq!(state.notice().unwrap().to_string(), "Add at least 3 ingredients");

        let mut list = two_ingredients();
        list.quick_add("onion");
        assert!(search(&mut state, &list, PrepTimeRange::default()).is_some());
    }

    #[test]
    fn search_clears_previous_results() {
        let mut state = MatcherState::default();
        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        state.finish_search(Ok(page(Some("t1"), vec![recipe(1, None)])));
        assert_eq!(state.recipes().len(), 1);

        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        assert!(state.recipes().is_empty());
        assert_eq!(state.token(), None);
        assert!(state.is_loading());
    }

    #[test]
    fn busy_state_blocks_second_search() {
        let mut state = MatcherState::default();
        assert!(search(&mut state, &two_ingredients(), PrepTimeRange::default()).is_some());
        assert_eq!(
            state.plan_search(&two_ingredients(), PrepTimeRange::default()),
            SearchPlan::Busy
        );
        assert!(load_more(&mut state).is_none());
    }

    #[test]
    fn empty_search_result_is_informational() {
        let mut state = MatcherState::default();
        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        state.finish_search(Ok(page(None, vec![])));
        let notice = state.notice().unwrap();
        assert_eq!(notice, &MatcherNotice::NoRecipesFound);
        assert!(!notice.is_error());
        assert!(!state.can_load_more());
    }

    #[test]
    fn failed_search_sets_generic_message() {
        let mut state = MatcherState::default();
        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        state.finish_search(Err(transport_error()));
        assert!(!state.is_loading());
        assert_eq!(state.notice().unwrap().to_string(), "Failed to fetch recipes");
        assert!(state.recipes().is_empty());
    }

    #[test]
    fn load_more_appends_to_accumulated_list() {
        let mut state = MatcherState::default();
        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        state.finish_search(Ok(page(Some("cursor"), vec![recipe(1, None), recipe(2, None)])));

        assert_eq!(load_more(&mut state).as_deref(), Some("cursor"));
        // Repeats from the server are kept.
        state.finish_load_more(Ok(page(None, vec![recipe(2, None), recipe(3, None)])));

        let ids: Vec<i64> = state.recipes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 2, 3]);
        assert_eq!(state.token(), Some("cursor"));
    }

    #[test]
    fn load_more_without_token_is_noop() {
        let mut state = MatcherState::default();
        assert!(load_more(&mut state).is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn empty_filtered_page_ends_pagination() {
        let mut state = MatcherState::default();
        let range = PrepTimeRange { min: None, max: Some(30) };
        search(&mut state, &two_ingredients(), range);
        state.finish_search(Ok(page(Some("cursor"), vec![recipe(1, Some(20))])));

        load_more(&mut state);
        state.finish_load_more(Ok(page(None, vec![recipe(2, Some(90)), recipe(3, None)])));

        assert!(state.is_exhausted());
        assert_eq!(state.notice(), Some(&MatcherNotice::NoMoreRecipes));
        assert_eq!(state.recipes().len(), 1);
        assert!(load_more(&mut state).is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn load_more_keeps_only_recipes_in_range() {
        let mut state = MatcherState::default();
        let range = PrepTimeRange { min: Some(10), max: Some(30) };
        search(&mut state, &two_ingredients(), range);
        state.finish_search(Ok(page(Some("c1"), vec![recipe(1, Some(15))])));

        load_more(&mut state);
        state.finish_load_more(Ok(page(Some("c2"), vec![recipe(2, Some(5)), recipe(3, Some(25))])));

        let ids: Vec<i64> = state.recipes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(state.token(), Some("c2"));
        assert!(state.can_load_more());
    }

    #[test]
    fn failed_load_more_keeps_results_and_token() {
        let mut state = MatcherState::default();
        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        state.finish_search(Ok(page(Some("cursor"), vec![recipe(1, None)])));

        load_more(&mut state);
        state.finish_load_more(Err(transport_error()));

        assert_eq!(state.recipes().len(), 1);
        assert_eq!(state.token(), Some("cursor"));
        assert_eq!(state.notice(), Some(&MatcherNotice::LoadMoreFailed));
        assert!(state.can_load_more());
    }

    #[test]
    fn new_search_resets_exhaustion() {
        let mut state = MatcherState::default();
        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        state.finish_search(Ok(page(Some("c"), vec![recipe(1, None)])));
        load_more(&mut state);
        state.finish_load_more(Ok(page(None, vec![])));
        assert!(state.is_exhausted());

        search(&mut state, &two_ingredients(), PrepTimeRange::default());
        assert!(!state.is_exhausted());
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn results_without_a_request_in_flight_are_dropped() {
        let mut state = MatcherState::default();
        state.finish_search(Ok(page(Some("c"), vec![recipe(1, None)])));
        assert!(state.recipes().is_empty());
        assert_eq!(state.token(), None);

        state.finish_load_more(Ok(page(None, vec![recipe(2, None)])));
        assert!(state.recipes().is_empty());
        assert!(!state.is_exhausted());
    }
}
