use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

use crate::decomposition::{Decomposer, Decomposition, NalgebraSvd};
use crate::error::RecommendError;
use crate::incidence::IncidenceMatrix;
use crate::preferences::Preferences;
use crate::recommender::Recommender;
use crate::types::{Ingredient, Recipe};

/// Recipes and the ingredients they use, both in insertion order.
///
/// Recipe order defines the rows and ingredient order the columns of the incidence
/// matrix. Both registries only grow and never hold duplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecipeDatabase {
    recipes: IndexSet<Recipe>,
    ingredients: IndexSet<Ingredient>,
}

impl RecipeDatabase {

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the recipe and any ingredients not seen before. Returns `false` without
    /// touching either registry if a recipe with the same name is already present.
    pub fn add_recipe(&mut self, recipe: Recipe) -> bool {
        if self.recipes.contains(&recipe) {
            debug!(recipe = recipe.name(), "recipe already present");
            return false;
        }

        for ingredient in recipe.ingredients() {
            if !self.ingredients.contains(ingredient) {
                self.ingredients.insert(ingredient.clone());
            }
        }
        self.recipes.insert(recipe);

        true
    }

    pub fn recipes(&self) -> &IndexSet<Recipe> {
        &self.recipes
    }

    pub fn ingredients(&self) -> &IndexSet<Ingredient> {
        &self.ingredients
    }

    pub fn recipe(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get_index(index)
    }

    pub fn ingredient(&self, column: usize) -> Option<&Ingredient> {
        self.ingredients.get_index(column)
    }

    pub fn column_of(&self, ingredient: &Ingredient) -> Option<usize> {
        self.ingredients.get_index_of(ingredient)
    }

    pub fn num_recipes(&self) -> usize {
        self.recipes.len()
    }

    pub fn num_ingredients(&self) -> usize {
        self.ingredients.len()
    }

    /// Freshly built from the current registries on every call.
    pub fn incidence_matrix(&self) -> IncidenceMatrix {
        IncidenceMatrix::build(&self.recipes, &self.ingredients)
    }

    pub fn decompose(&self) -> Result<Decomposition, RecommendError> {
        NalgebraSvd::default().decompose(&self.incidence_matrix().to_dense())
    }

    /// Shorthand for [`Recommender::recommend`] with the default recommender.
    pub fn recommend<P>(
        &self,
        user: &P,
        values_to_consider: usize,
    ) -> Result<Option<Vec<&Ingredient>>, RecommendError>
    where
        P: Preferences + ?Sized,
    {
        Recommender::default().recommend(self, user, values_to_consider)
    }
}

impl Extend<Recipe> for RecipeDatabase {
    fn extend<T: IntoIterator<Item = Recipe>>(&mut self, recipes: T) {
        for recipe in recipes {
            self.add_recipe(recipe);
        }
    }
}

impl FromIterator<Recipe> for RecipeDatabase {
    fn from_iter<T: IntoIterator<Item = Recipe>>(recipes: T) -> Self {
        let mut database = RecipeDatabase::new();
        database.extend(recipes);
        database
    }
}

impl fmt::Display for RecipeDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ingredients")?;
        let names: Vec<&str> = self.ingredients.iter().map(Ingredient::name).collect();
        writeln!(f, "[{}]", names.join(", "))?;
        writeln!(f)?;
        write!(f, "Recipes:")?;
        for recipe in &self.recipes {
            write!(f, "\n{}", recipe)?;
        }
        Ok(())
    }
}
