use tracing::{debug, instrument, trace};

use crate::config::RecommenderConfig;
use crate::database::RecipeDatabase;
use crate::decomposition::{Decomposer, NalgebraSvd};
use crate::error::{ensure_dimension, RecommendError};
use crate::preferences::{preference_vector, Preferences};
use crate::ranking::{project, rank_by_score};
use crate::types::{Ingredient, ScoredIngredient};

/// Ranks ingredients for a user by projecting their opinions through the leading right
/// singular vectors of the recipe/ingredient incidence matrix.
///
/// Nothing is cached: every call rebuilds the matrix and its decomposition from the
/// database it is handed.
#[derive(Debug, Clone)]
pub struct Recommender<D = NalgebraSvd> {
    decomposer: D,
    config: RecommenderConfig,
}

impl Default for Recommender<NalgebraSvd> {
    fn default() -> Self {
        Self::new(RecommenderConfig::default())
    }
}

impl Recommender<NalgebraSvd> {

    pub fn new(config: RecommenderConfig) -> Self {
        Self::with_decomposer(NalgebraSvd::default(), config)
    }
}

impl<D: Decomposer> Recommender<D> {

    pub fn with_decomposer(decomposer: D, config: RecommenderConfig) -> Self {
        Self { decomposer, config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Projected affinity per ingredient, in ingredient registry order.
    ///
    /// Returns `Ok(None)` if the user has no preferences or if `values_to_consider` is not
    /// smaller than the number of ingredients.
    #[instrument(level = "debug", skip(self, database, user))]
    pub fn scores<P>(
        &self,
        database: &RecipeDatabase,
        user: &P,
        values_to_consider: usize,
    ) -> Result<Option<Vec<f64>>, RecommendError>
    where
        P: Preferences + ?Sized,
    {
        let num_ingredients = database.num_ingredients();

        if !user.has_preferences() {
            debug!("user has no preferences, no recommendation");
            return Ok(None);
        }
        if values_to_consider >= num_ingredients {
            debug!(num_ingredients, "too many latent values requested, no recommendation");
            return Ok(None);
        }

        let preferences = preference_vector(user, database.ingredients());

        let incidence = database.incidence_matrix();
        let (rows, cols) = incidence.shape();
        ensure_dimension("incidence matrix rows", database.num_recipes(), rows)?;
        ensure_dimension("incidence matrix columns", num_ingredients, cols)?;
        if incidence.is_degenerate() {
            return Err(RecommendError::DegenerateMatrix { rows, cols });
        }

        let decomposition = self.decomposer.decompose(&incidence.to_dense())?;
        ensure_dimension("right singular vector length", num_ingredients, decomposition.v.nrows())?;

        let reduced_basis = decomposition.reduced_basis(values_to_consider + 1)?;
        let scores = project(&preferences, &reduced_basis)?;
        ensure_dimension("projected scores", num_ingredients, scores.len())?;

        if self.config.log_vectors {
            trace!(preferences = ?preferences.as_slice(), "preference vector");
            trace!(scores = ?scores, "projected scores");
        }

        Ok(Some(scores))
    }

    /// The ranking of [`Recommender::recommend`] together with each ingredient's score.
    pub fn recommend_with_scores<'db, P>(
        &self,
        database: &'db RecipeDatabase,
        user: &P,
        values_to_consider: usize,
    ) -> Result<Option<Vec<ScoredIngredient<'db>>>, RecommendError>
    where
        P: Preferences + ?Sized,
    {
        let scores = match self.scores(database, user, values_to_consider)? {
            Some(scores) => scores,
            None => return Ok(None),
        };

        let ingredients = database.ingredients();
        let ranked = rank_by_score(&scores)?
            .into_iter()
            .map(|column| {
                ingredients
                    .get_index(column)
                    .map(|ingredient| ScoredIngredient::new(ingredient, column, scores[column]))
                    .ok_or(RecommendError::DimensionMismatch {
                        what: "ranked column",
                        expected: ingredients.len(),
                        actual: column,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ranked))
    }

    /// Every ingredient of the database, most to least liked. Equal scores keep registry
    /// order.
    pub fn recommend<'db, P>(
        &self,
        database: &'db RecipeDatabase,
        user: &P,
        values_to_consider: usize,
    ) -> Result<Option<Vec<&'db Ingredient>>, RecommendError>
    where
        P: Preferences + ?Sized,
    {
        Ok(self
            .recommend_with_scores(database, user, values_to_consider)?
            .map(|ranked| ranked.into_iter().map(|scored| scored.ingredient).collect()))
    }

    /// Like [`Recommender::recommend`], restricted to ingredients the user has not rated.
    pub fn recommend_unrated<'db, P>(
        &self,
        database: &'db RecipeDatabase,
        user: &P,
        values_to_consider: usize,
    ) -> Result<Option<Vec<&'db Ingredient>>, RecommendError>
    where
        P: Preferences + ?Sized,
    {
        Ok(self.recommend(database, user, values_to_consider)?.map(|ranked| {
            ranked
                .into_iter()
                .filter(|ingredient| user.preference(ingredient).is_none())
                .collect()
        }))
    }
}
