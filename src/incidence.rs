use indexmap::IndexSet;
use nalgebra::DMatrix;
use sprs::{CsMat, TriMat};
use tracing::debug;

use crate::types::{Ingredient, Recipe};

const PRESENT: f64 = 1.0;

/// Binary recipe x ingredient matrix, rows in recipe order and columns in ingredient order.
pub struct IncidenceMatrix {
    representation: CsMat<f64>,
}

impl IncidenceMatrix {

    /// Builds the matrix from the current registries. Either side may be empty, in which
    /// case the matrix has zero rows or zero columns.
    pub fn build(recipes: &IndexSet<Recipe>, ingredients: &IndexSet<Ingredient>) -> Self {
        let num_recipes = recipes.len();
        let num_ingredients = ingredients.len();

        let mut input = TriMat::new((num_recipes, num_ingredients));
        for (row, recipe) in recipes.iter().enumerate() {
            for ingredient in recipe.ingredients() {
                if let Some(column) = ingredients.get_index_of(ingredient) {
                    input.add_triplet(row, column, PRESENT);
                }
            }
        }

        let matrix = Self { representation: input.to_csr() };

        debug!(
            recipes = num_recipes,
            ingredients = num_ingredients,
            nnz = matrix.nnz(),
            "built incidence matrix"
        );

        matrix
    }

    /// `(recipes, ingredients)`
    pub fn shape(&self) -> (usize, usize) {
        self.representation.shape()
    }

    pub fn nnz(&self) -> usize {
        self.representation.nnz()
    }

    pub fn is_degenerate(&self) -> bool {
        let (rows, cols) = self.shape();
        rows == 0 || cols == 0
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        let (rows, cols) = self.shape();
        if row >= rows || column >= cols {
            return false;
        }
        self.representation.get(row, column).is_some()
    }

    /// Columns of the ingredients used by the recipe in `row`.
    pub fn row_ingredients(&self, row: usize) -> Vec<usize> {
        self.representation
            .outer_view(row)
            .map(|recipe| recipe.indices().to_vec())
            .unwrap_or_default()
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let (rows, cols) = self.shape();
        let mut dense = DMatrix::zeros(rows, cols);
        for (row, recipe) in self.representation.outer_iterator().enumerate() {
            for (column, &value) in recipe.iter() {
                dense[(row, column)] = value;
            }
        }
        dense
    }
}
