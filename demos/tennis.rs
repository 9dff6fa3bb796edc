//! Grows a tree on the play-tennis dataset and predicts one day.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example tennis
//! ```
use cartree::prelude::*;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use std::collections::HashMap;


fn main() -> Result<(), TreeError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();


    // Read the dataset, dropping the non-feature column `day`.
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/datasets/play_tennis.csv");
    let sample = SampleReader::new()
        .file(path)
        .has_header(true)
        .ignore(["day"])
        .target_feature("play")
        .read()?;


    let mut tree = DecisionTreeBuilder::new()
        .max_depth(3)
        .build();
    tree.fit(&sample)?;


    tree.print_tree()?;


    let day = [
        ("outlook", "Rain"),
        ("temp", "Cold"),
        ("humidity", "High"),
        ("wind", "Weak"),
    ];
    let day = day.into_iter()
        .map(|(k, v)| (k.to_string(), OwnedValue::from(v)))
        .collect::<HashMap<_, _>>();

    let prediction = tree.predict_instance(&day)?;
    println!("{} {prediction}", "Prediction:".bold().green());

    Ok(())
}
