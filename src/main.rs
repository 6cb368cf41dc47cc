use anyhow::Result;
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use tabclf::config::ModelFamily;
use tabclf::pipeline::{run_pipeline, PipelineConfig, PipelineOutcome};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TABCLF_LOG", "error,tabclf=info"))
        .init();

    let matches = Command::new("tabclf")
        .version(clap::crate_version!())
        .about("Compare binary classifiers on a labeled CSV table")
        .arg(
            Arg::new("data")
                .help("Path to the input CSV (feature columns, trailing label column)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output")
                .help("Directory for result tables, plots, and the run summary")
                .default_value("tabclf_results")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("test_fraction")
                .long("test-fraction")
                .help("Share of rows held out for evaluation")
                .default_value("0.2")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("folds")
                .long("folds")
                .help("Number of cross-validation folds for the grid search")
                .default_value("5")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the split, folds, and all stochastic models")
                .default_value("42")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("models")
                .short('m')
                .long("models")
                .help(
                    "Comma-separated model families to compare \
                     (logistic, svm, random_forest, gbdt). Defaults to all four.",
                )
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::Other),
        )
        .get_matches();

    let data: &PathBuf = matches.get_one("data").unwrap();
    let output_dir: &PathBuf = matches.get_one("output_dir").unwrap();

    let mut config = PipelineConfig::new(data, output_dir);
    config.test_fraction = *matches.get_one::<f32>("test_fraction").unwrap();
    config.n_folds = *matches.get_one::<usize>("folds").unwrap();
    config.seed = *matches.get_one::<u64>("seed").unwrap();
    config.shap.seed = config.seed;

    if let Some(families) = matches.get_one::<String>("models") {
        config.families = families
            .split(',')
            .map(|name| ModelFamily::from_str(name.trim()).map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;
    }

    match run_pipeline(&config) {
        Ok(outcome) => {
            print_comparison(&outcome);
            println!("\nResults written to {}", output_dir.display());
            Ok(())
        }
        Err(e) => {
            log::error!("Pipeline failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn print_comparison(outcome: &PipelineOutcome) {
    println!("\nModel comparison (held-out test split)");
    println!("{}", "-".repeat(79));
    println!(
        "{:<22} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7}",
        "Model", "Accuracy", "F1 (wtd)", "ROC AUC", "Sens.", "Spec.", "MCC"
    );
    println!("{}", "-".repeat(79));
    for eval in &outcome.evaluations {
        println!(
            "{:<22} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>7.4}",
            eval.name,
            eval.accuracy,
            eval.weighted_f1,
            eval.roc_auc,
            eval.sensitivity,
            eval.specificity,
            eval.mcc
        );
    }
    println!("{}", "-".repeat(79));
}
