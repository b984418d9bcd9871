use nalgebra::*;
use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;
use crate::calc::running;
use crate::fit::{Estimator, LinearDiscriminant};
use crate::sample::train_test_split;
use crate::error::{LdaError, Result};
use super::Dataset;

/// Settings shared by the fit, boundary and statistics routines. Any field missing from
/// a settings file takes its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialSettings {

    /// Number of generated observations per dataset.
    pub n_points : usize,

    /// Fraction of the observations held out for testing.
    pub test_size : f64,

    /// Seed of single-run routines (fit and boundary).
    pub seed : u64,

    /// One trial is run for each of these seeds.
    pub seeds : Vec<u64>

}

impl Default for TrialSettings {

    fn default() -> Self {
        Self {
            n_points : 1500,
            test_size : 0.2,
            seed : 11,
            seeds : vec![11, 13, 17, 23, 27]
        }
    }

}

impl TrialSettings {

    /// Reads settings from a JSON file.
    pub fn open(path : impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings : Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(LdaError::InvalidParameter {
                name : "test_size",
                message : "must be in the open interval (0, 1)"
            });
        }
        if self.n_points < 2 {
            return Err(LdaError::InvalidParameter { name : "n_points", message : "must be at least 2" });
        }
        if self.seeds.is_empty() {
            return Err(LdaError::InvalidParameter { name : "seeds", message : "must not be empty" });
        }
        Ok(())
    }

}

/// Test-set accuracy of each trial, with their mean and population (ddof = 0) standard deviation.
#[derive(Debug, Clone, Serialize)]
pub struct TrialReport {

    pub accuracies : Vec<f64>,

    pub mean : f64,

    pub std : f64

}

/// For each seed: generates n_points observations, splits them into train/test
/// sets with the same seed, fits a linear discriminant on the training set and scores it
/// on the test set.
pub fn run_trials<G>(generator : G, settings : &TrialSettings) -> Result<TrialReport>
where
    G : Fn(usize, u64) -> Result<(DMatrix<f64>, Vec<u32>)>
{
    settings.validate()?;
    let mut accuracies = Vec::with_capacity(settings.seeds.len());
    for seed in settings.seeds.iter() {
        let (x, y) = generator(settings.n_points, *seed)?;
        let split = train_test_split(&x, &y[..], settings.test_size, *seed)?;
        let mut lda = LinearDiscriminant::new();
        lda.fit(&split.train_x, &split.train_y[..])?;
        let acc = lda.score(&split.test_x, &split.test_y[..])?;
        tracing::debug!(seed = *seed, accuracy = acc, "trial finished");
        accuracies.push(acc);
    }
    let (mean, std) = running::mean_stddev(&accuracies, false);
    Ok(TrialReport { accuracies, mean, std })
}

/// Runs the trials for both synthetic datasets.
pub fn compute_statistics(settings : &TrialSettings) -> Result<(TrialReport, TrialReport)> {
    let first = run_trials(|n, s| Dataset::One.generate(n, s), settings)?;
    let second = run_trials(|n, s| Dataset::Two.generate(n, s), settings)?;
    Ok((first, second))
}

#[test]
fn settings_defaults() {
    let settings : TrialSettings = serde_json::from_str(r#"{ "n_points" : 200 }"#).unwrap();
    assert_eq!(settings.n_points, 200);
    assert_eq!(settings.seeds, vec![11, 13, 17, 23, 27]);
    assert!(settings.validate().is_ok());

    let bad = TrialSettings { test_size : 1.5, ..Default::default() };
    assert!(bad.validate().is_err());
}
