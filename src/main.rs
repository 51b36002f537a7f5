use std::env;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use ingredient_recommender::{
    Recipe, RecipeDatabase, RecommendError, Recommender, RecommenderConfig, User,
};

const CONFIG_VARIABLE: &str = "INGREDIENT_RECOMMENDER_CONFIG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "recommendation demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), RecommendError> {
    let config = match env::var_os(CONFIG_VARIABLE) {
        Some(path) => RecommenderConfig::from_file(path)?,
        None => RecommenderConfig::default(),
    };
    let recommender = Recommender::new(config);

    let recipes = vec![
        Recipe::new("Pancakes", ["Flour", "Egg", "Milk", "Sugar"]),
        Recipe::new("Bread", ["Flour", "Yeast", "Salt", "Water"]),
        Recipe::new("Omelette", ["Egg", "Salt", "Butter"]),
        Recipe::new("Shortbread", ["Flour", "Butter", "Sugar"]),
        Recipe::new("Custard", ["Egg", "Milk", "Sugar"]),
    ];
    let database: RecipeDatabase = recipes.into_iter().collect();

    println!("{}\n", database);

    let mut user = User::new("demo");
    user.like("Sugar");
    user.like("Milk");
    user.dislike("Salt");

    for values_to_consider in 0..database.num_ingredients() {
        match recommender.recommend_with_scores(&database, &user, values_to_consider)? {
            Some(ranked) => {
                let ranked: Vec<String> = ranked
                    .iter()
                    .map(|scored| format!("{} ({:.3})", scored.ingredient, scored.score))
                    .collect();
                println!("{:?}: {}", values_to_consider, ranked.join(", "));
            }
            None => println!("{:?}: no recommendation", values_to_consider),
        }
    }

    let unrated = recommender.recommend_unrated(&database, &user, 2)?;
    println!("\nNot yet rated: {:?}", unrated);

    Ok(())
}
