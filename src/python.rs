use std::collections::HashMap;

use nalgebra::DMatrix;
use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::database::RecipeDatabase;
use crate::error::RecommendError;
use crate::recommender::Recommender;
use crate::types::{Ingredient, Recipe};

impl From<RecommendError> for PyErr {
    fn from(err: RecommendError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Flattens row by row; nalgebra stores column-major while numpy expects C order.
fn row_major(dense: &DMatrix<f64>) -> Vec<f64> {
    dense.transpose().iter().copied().collect()
}

fn preferences_from(ratings: HashMap<String, bool>) -> HashMap<Ingredient, bool> {
    ratings
        .into_iter()
        .map(|(name, liked)| (Ingredient::new(name), liked))
        .collect()
}

#[pyclass]
struct Database {
    database: RecipeDatabase,
    recommender: Recommender,
}

#[pymethods]
impl Database {

    #[new]
    fn new() -> Self {
        Self {
            database: RecipeDatabase::new(),
            recommender: Recommender::default(),
        }
    }

    fn add_recipe(&mut self, name: String, ingredients: Vec<String>) -> bool {
        self.database.add_recipe(Recipe::new(name, ingredients))
    }

    fn ingredients(&self) -> Vec<String> {
        self.database
            .ingredients()
            .iter()
            .map(|ingredient| ingredient.name().to_string())
            .collect()
    }

    fn incidence_matrix<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<f64>> {
        let dense = self.database.incidence_matrix().to_dense();
        let (rows, cols) = dense.shape();
        PyArray1::from_vec(py, row_major(&dense)).reshape([rows, cols])
    }

    /// Ingredient names of the recipe at `index`, in column order.
    fn recipe_ingredients(&self, index: usize) -> Vec<String> {
        self.database
            .incidence_matrix()
            .row_ingredients(index)
            .into_iter()
            .filter_map(|column| self.database.ingredient(column))
            .map(|ingredient| ingredient.name().to_string())
            .collect()
    }

    fn contains(&self, recipe: usize, ingredient: &str) -> bool {
        self.database
            .column_of(&Ingredient::new(ingredient))
            .map_or(false, |column| self.database.incidence_matrix().contains(recipe, column))
    }

    fn scores<'py>(
        &self,
        py: Python<'py>,
        ratings: HashMap<String, bool>,
        values_to_consider: usize,
    ) -> PyResult<Option<&'py PyArray1<f64>>> {
        let preferences = preferences_from(ratings);
        let scores = self.recommender.scores(&self.database, &preferences, values_to_consider)?;
        Ok(scores.map(|scores| PyArray1::from_vec(py, scores)))
    }

    fn recommend(
        &self,
        ratings: HashMap<String, bool>,
        values_to_consider: usize,
    ) -> PyResult<Option<Vec<String>>> {
        let preferences = preferences_from(ratings);
        let ranked = self.recommender.recommend(&self.database, &preferences, values_to_consider)?;
        Ok(ranked.map(|ranked| {
            ranked
                .into_iter()
                .map(|ingredient| ingredient.name().to_string())
                .collect()
        }))
    }

    fn __len__(&self) -> usize {
        self.database.num_recipes()
    }

    fn __repr__(&self) -> String {
        self.database.to_string()
    }
}

#[pymodule]
fn ingredient_recommender(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<Database>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies_and_crackers() -> Database {
        let mut database = Database::new();
        database.add_recipe("Cookies".to_string(), vec!["Flour".to_string(), "Sugar".to_string()]);
        database.add_recipe("Crackers".to_string(), vec!["Flour".to_string(), "Salt".to_string()]);
        database
    }

    #[test]
    fn test_row_major_layout() {
        let dense = DMatrix::from_row_slice(2, 3, &[
            1.0, 1.0, 0.0,
            1.0, 0.0, 1.0,
        ]);
        assert_eq!(row_major(&dense), vec![1.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_recipe_lookups() {
        let database = cookies_and_crackers();

        assert_eq!(database.__len__(), 2);
        assert_eq!(database.ingredients(), vec!["Flour", "Sugar", "Salt"]);
        assert_eq!(database.recipe_ingredients(1), vec!["Flour", "Salt"]);
        assert!(database.recipe_ingredients(7).is_empty());
        assert!(database.contains(0, "Sugar"));
        assert!(!database.contains(0, "Salt"));
        assert!(!database.contains(0, "Butter"));
    }

    #[test]
    fn test_incidence_matrix_array() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let array = cookies_and_crackers().incidence_matrix(py).unwrap();

            assert_eq!(array.shape(), &[2, 3]);
            assert_eq!(array.to_vec().unwrap(), vec![1.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        });
    }

    #[test]
    fn test_recommend() {
        let database = cookies_and_crackers();
        let ratings = HashMap::from([("Sugar".to_string(), true), ("Salt".to_string(), false)]);

        let ranked = database.recommend(ratings, 1).unwrap().unwrap();
        assert_eq!(ranked, vec!["Sugar", "Flour", "Salt"]);

        assert!(database.recommend(HashMap::new(), 1).unwrap().is_none());
    }
}
