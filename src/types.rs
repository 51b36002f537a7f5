use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// An ingredient, identified by its exact name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ingredient {
    name: String,
}

impl Ingredient {

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Ingredient {
    fn from(name: &str) -> Self {
        Ingredient::new(name)
    }
}

impl From<String> for Ingredient {
    fn from(name: String) -> Self {
        Ingredient::new(name)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A named recipe and the ingredients it uses.
///
/// Two recipes are the same recipe iff their names are equal; the ingredient list does
/// not take part in equality or hashing. Ingredients keep their first-seen order and
/// repeated ingredients are collapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    name: String,
    ingredients: IndexSet<Ingredient>,
}

impl Recipe {

    pub fn new<I, T>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ingredient>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &IndexSet<Ingredient> {
        &self.ingredients
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.ingredients.contains(ingredient)
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.name)?;
        for (position, ingredient) in self.ingredients.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ingredient)?;
        }
        f.write_str("]")
    }
}

/// An ingredient together with its projected affinity score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredIngredient<'a> {
    pub ingredient: &'a Ingredient,
    pub column: usize,
    pub score: f64,
}

impl<'a> ScoredIngredient<'a> {

    pub fn new(ingredient: &'a Ingredient, column: usize, score: f64) -> Self {
        ScoredIngredient { ingredient, column, score }
    }
}
