use std::collections::HashMap;

use indexmap::IndexSet;
use nalgebra::RowDVector;
use serde::{Deserialize, Serialize};

use crate::types::Ingredient;

const LIKED: f64 = 1.0;
const DISLIKED: f64 = -1.0;
const UNRATED: f64 = 0.0;

/// Read access to a user's like/dislike opinions.
pub trait Preferences {

    /// `Some(true)` for liked, `Some(false)` for disliked, `None` for no opinion.
    fn preference(&self, ingredient: &Ingredient) -> Option<bool>;

    fn has_preferences(&self) -> bool;
}

impl Preferences for HashMap<Ingredient, bool> {

    fn preference(&self, ingredient: &Ingredient) -> Option<bool> {
        self.get(ingredient).copied()
    }

    fn has_preferences(&self) -> bool {
        !self.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    name: String,
    preferences: HashMap<Ingredient, bool>,
}

impl User {

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), preferences: HashMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn like(&mut self, ingredient: impl Into<Ingredient>) {
        self.preferences.insert(ingredient.into(), true);
    }

    pub fn dislike(&mut self, ingredient: impl Into<Ingredient>) {
        self.preferences.insert(ingredient.into(), false);
    }

    /// Drops any opinion about the ingredient.
    pub fn forget(&mut self, ingredient: &Ingredient) -> Option<bool> {
        self.preferences.remove(ingredient)
    }

    pub fn preferences(&self) -> &HashMap<Ingredient, bool> {
        &self.preferences
    }
}

impl Preferences for User {

    fn preference(&self, ingredient: &Ingredient) -> Option<bool> {
        self.preferences.preference(ingredient)
    }

    fn has_preferences(&self) -> bool {
        self.preferences.has_preferences()
    }
}

/// Signed opinion vector aligned with the ingredient order: +1 liked, -1 disliked,
/// 0 unrated.
pub fn preference_vector<P>(preferences: &P, ingredients: &IndexSet<Ingredient>) -> RowDVector<f64>
where
    P: Preferences + ?Sized,
{
    RowDVector::from_iterator(
        ingredients.len(),
        ingredients.iter().map(|ingredient| match preferences.preference(ingredient) {
            Some(true) => LIKED,
            Some(false) => DISLIKED,
            None => UNRATED,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(names: &[&str]) -> IndexSet<Ingredient> {
        names.iter().copied().map(Ingredient::new).collect()
    }

    #[test]
    fn test_column_alignment() {
        let mut user = User::new("alice");
        user.dislike("C");
        user.like("A");

        let vector = preference_vector(&user, &ingredients(&["A", "B", "C"]));

        assert_eq!(vector, RowDVector::from_row_slice(&[1.0, 0.0, -1.0]));
    }

    #[test]
    fn test_vector_follows_registry_order_not_rating_order() {
        let mut user = User::new("bob");
        user.like("Salt");
        user.dislike("Flour");

        let vector = preference_vector(&user, &ingredients(&["Flour", "Sugar", "Salt"]));

        assert_eq!(vector, RowDVector::from_row_slice(&[-1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_unknown_ratings_are_ignored() {
        let mut user = User::new("carol");
        user.like("Saffron");

        let vector = preference_vector(&user, &ingredients(&["Rice", "Water"]));

        assert_eq!(vector, RowDVector::from_row_slice(&[0.0, 0.0]));
        assert!(user.has_preferences());
    }

    #[test]
    fn test_forget_and_relabel() {
        let mut user = User::new("dave");
        user.like("Basil");
        user.dislike("Basil");
        assert_eq!(user.preference(&Ingredient::new("Basil")), Some(false));

        assert_eq!(user.forget(&Ingredient::new("Basil")), Some(false));
        assert_eq!(user.preference(&Ingredient::new("Basil")), None);
        assert!(!user.has_preferences());
    }

    #[test]
    fn test_map_preferences() {
        let mut map = HashMap::new();
        map.insert(Ingredient::new("Egg"), true);

        let vector = preference_vector(&map, &ingredients(&["Milk", "Egg"]));

        assert_eq!(vector, RowDVector::from_row_slice(&[0.0, 1.0]));
    }

    #[test]
    fn test_empty_registry() {
        let mut user = User::new("erin");
        user.like("Egg");

        assert_eq!(preference_vector(&user, &IndexSet::new()).len(), 0);
    }
}
