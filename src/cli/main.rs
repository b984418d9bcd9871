use lda::fit::{LinearDiscriminant, Estimator, Classifier};
use lda::sim::*;
use lda::sample::train_test_split;
use lda::decision::{DecisionGrid, write_points_csv};
use structopt::*;
use std::path::PathBuf;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Fit and evaluate linear discriminant analysis on synthetic two-class datasets
#[derive(StructOpt, Debug)]
pub enum Lda {

    /// Fit on the training split of one dataset and print the estimated parameters,
    /// the test-set probabilities and predictions.
    Fit {
        #[structopt(short, long, default_value="1")]
        dataset : Dataset,

        #[structopt(short, long)]
        config : Option<PathBuf>
    },

    /// Write the decision regions over the test split of both datasets as CSV tables.
    Boundary {
        #[structopt(short, long, default_value=".")]
        output : PathBuf,

        /// Mesh step along both axes.
        #[structopt(short, long, default_value="0.02")]
        step : f64,

        #[structopt(short, long)]
        config : Option<PathBuf>
    },

    /// Mean and standard deviation of the test accuracy over the configured seeds.
    Stats {
        #[structopt(short, long)]
        config : Option<PathBuf>,

        /// Print the reports as JSON.
        #[structopt(long)]
        json : bool
    }

}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(path : &Option<PathBuf>) -> anyhow::Result<TrialSettings> {
    match path {
        Some(path) => TrialSettings::open(path)
            .with_context(|| format!("Error opening settings {}", path.display()) ),
        None => Ok(Default::default())
    }
}

fn fit(dataset : Dataset, settings : &TrialSettings) -> anyhow::Result<()> {
    let (x, y) = dataset.generate(settings.n_points, settings.seed)?;
    let split = train_test_split(&x, &y[..], settings.test_size, settings.seed)?;
    let mut lda = LinearDiscriminant::new();
    let params = lda.fit(&split.train_x, &split.train_y[..])?;
    println!("{}", params);
    println!("proba = {}", lda.predict_proba(&split.test_x)?);
    println!("predicted = {:?}", lda.predict(&split.test_x)?);
    Ok(())
}

fn boundary(output : &PathBuf, step : f64, settings : &TrialSettings) -> anyhow::Result<()> {
    for dataset in [Dataset::One, Dataset::Two].iter() {
        let (x, y) = dataset.generate(settings.n_points, settings.seed)?;
        let split = train_test_split(&x, &y[..], settings.test_size, settings.seed)?;
        let mut lda = LinearDiscriminant::new();
        lda.fit(&split.train_x, &split.train_y[..])?;
        let grid = DecisionGrid::around(&lda, &split.test_x, 0.5, step)?;
        let grid_path = output.join(format!("{}_grid.csv", dataset.stem()));
        let points_path = output.join(format!("{}_test.csv", dataset.stem()));
        grid.write_csv(&grid_path)
            .with_context(|| format!("Error writing {}", grid_path.display()) )?;
        write_points_csv(&points_path, &split.test_x, &split.test_y[..])
            .with_context(|| format!("Error writing {}", points_path.display()) )?;
        println!("{}: {} mesh points written to {}", dataset, grid.len(), grid_path.display());
    }
    Ok(())
}

fn stats(settings : &TrialSettings, json : bool) -> anyhow::Result<()> {
    let (first, second) = compute_statistics(settings)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&[&first, &second])?);
    } else {
        println!("mean1 = {}", first.mean);
        println!("mean2 = {}", second.mean);
        println!("std1 = {}", first.std);
        println!("std2 = {}", second.std);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    match Lda::from_args() {
        Lda::Fit { dataset, config } => fit(dataset, &load_settings(&config)?),
        Lda::Boundary { output, step, config } => boundary(&output, step, &load_settings(&config)?),
        Lda::Stats { config, json } => stats(&load_settings(&config)?, json)
    }
}
