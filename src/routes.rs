use crate::pages::{LikedPage, LoginPage, MatcherPage, RecipeDetailPage, RegisterPage};
use pantry_pilot::RecipeId;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/")]
    Home,
    #[at("/recipe-matcher")]
    RecipeMatcher,
    #[at("/liked-recipes")]
    LikedRecipes,
    #[at("/recipes/:id")]
    Recipe { id: RecipeId },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Home | Route::RecipeMatcher => html! { <MatcherPage /> },
        Route::LikedRecipes => html! { <LikedPage /> },
        Route::Recipe { id } => html! { <RecipeDetailPage {id} /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::RecipeMatcher} /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_route_carries_id() {
        assert_eq!(Route::recognize("/recipes/42"), Some(Route::Recipe { id: 42 }));
        assert_eq!(Route::Recipe { id: 7 }.to_path(), "/recipes/7");
    }

    #[test]
    fn known_and_unknown_paths() {
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize("/liked-recipes"), Some(Route::LikedRecipes));
        assert_eq!(Route::recognize("/no/such/page"), Some(Route::NotFound));
    }
}
