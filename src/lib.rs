//! Latent-factor ingredient recommendations.
//!
//! Recipes and their ingredients form a binary incidence matrix. A user's likes and
//! dislikes are projected through the leading right singular vectors of that matrix, so
//! ingredients the user never rated pick up scores from the recipes they share with rated
//! ones.
//!
//! ```
//! use ingredient_recommender::{Recipe, RecipeDatabase, User};
//!
//! let mut database = RecipeDatabase::new();
//! database.add_recipe(Recipe::new("Cookies", ["Flour", "Sugar"]));
//! database.add_recipe(Recipe::new("Crackers", ["Flour", "Salt"]));
//!
//! let mut user = User::new("sam");
//! user.like("Sugar");
//! user.dislike("Salt");
//!
//! let ranked = database.recommend(&user, 1).unwrap().unwrap();
//! let names: Vec<&str> = ranked.iter().map(|ingredient| ingredient.name()).collect();
//! assert_eq!(names, vec!["Sugar", "Flour", "Salt"]);
//! ```

pub mod config;
pub mod database;
pub mod decomposition;
pub mod error;
pub mod incidence;
pub mod preferences;
pub mod ranking;
pub mod recommender;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use config::RecommenderConfig;
pub use database::RecipeDatabase;
pub use decomposition::{Decomposer, Decomposition, NalgebraSvd};
pub use error::RecommendError;
pub use incidence::IncidenceMatrix;
pub use preferences::{preference_vector, Preferences, User};
pub use recommender::Recommender;
pub use types::{Ingredient, Recipe, ScoredIngredient};
