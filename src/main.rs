use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use sylva_io::DatasetReader;
use sylva_rf::{
    DecisionTreeConfig, RandomForestConfig, TestSize, TrainingMetadata, accuracy,
    train_test_split,
};

#[derive(Parser)]
#[command(name = "sylva")]
#[command(about = "Entropy-based random forest classification of labelled CSV tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 0, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel prediction (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Number of features drawn per split: a count, or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeatureCount {
    All,
    Count(usize),
}

impl FeatureCount {
    fn as_option(self) -> Option<usize> {
        match self {
            FeatureCount::All => None,
            FeatureCount::Count(n) => Some(n),
        }
    }
}

impl FromStr for FeatureCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(FeatureCount::All);
        }
        s.parse()
            .map(FeatureCount::Count)
            .map_err(|_| format!("expected a feature count or \"all\", got \"{s}\""))
    }
}

/// Tree-growing parameters shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct TreeArgs {
    /// Random features considered per split, or "all"
    #[arg(long, default_value = "2")]
    n_features: FeatureCount,

    /// Maximum tree depth
    #[arg(long, default_value_t = 4)]
    max_depth: usize,

    /// Minimum partition size to attempt a split
    #[arg(long, default_value_t = 2)]
    min_samples: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Hold out part of a CSV table, train a forest on the rest, report accuracy
    Evaluate {
        /// Path to the input CSV file (last column is the label)
        #[arg(long)]
        data: PathBuf,

        /// Number of trees in the forest
        #[arg(long, default_value_t = 4)]
        n_trees: usize,

        /// Rows drawn with replacement for each tree
        #[arg(long, default_value_t = 800)]
        n_bootstrap: usize,

        /// Share of rows held out for testing
        #[arg(long, default_value_t = 0.2)]
        test_size: f64,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Fit a single decision tree on a CSV table and print it
    Tree {
        /// Path to the input CSV file (last column is the label)
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct EvaluateOutput {
    data: PathBuf,
    n_train: usize,
    n_test: usize,
    accuracy: f64,
    n_correct: usize,
    max_depth: usize,
    min_samples: usize,
    n_features_per_split: Option<usize>,
    training: TrainingMetadata,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Evaluate {
            data,
            n_trees,
            n_bootstrap,
            test_size,
            tree,
        } => {
            // 1. Read dataset
            let dataset = DatasetReader::new(&data)
                .read()
                .context("failed to read input CSV")?;

            // 2. Hold out the test rows
            let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
            let (train, test) =
                train_test_split(&dataset, TestSize::Fraction(test_size), &mut rng)
                    .context("failed to split dataset")?;
            info!(n_train = train.n_samples(), n_test = test.n_samples(), "holdout split");

            // 3. Train
            let rf_config = RandomForestConfig::new(n_trees)?
                .with_n_bootstrap(Some(n_bootstrap))
                .with_n_features(tree.n_features.as_option())
                .with_max_depth(tree.max_depth)
                .with_min_samples(tree.min_samples)
                .with_seed(cli.seed);
            let result = rf_config.fit(&train).context("forest training failed")?;

            // 4. Predict the holdout
            let predictions = result
                .forest()
                .predict_batch(&test)
                .context("prediction failed")?;
            let acc = accuracy(&predictions, test.labels())?;
            let n_correct = predictions
                .iter()
                .zip(test.labels())
                .filter(|(p, t)| p == t)
                .count();
            info!(accuracy = acc, n_correct, n_test = test.n_samples(), "evaluation complete");

            let output = EvaluateOutput {
                data,
                n_train: train.n_samples(),
                n_test: test.n_samples(),
                accuracy: acc,
                n_correct,
                max_depth: tree.max_depth,
                min_samples: tree.min_samples,
                n_features_per_split: tree.n_features.as_option(),
                training: result.metadata().clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Tree { data, tree } => {
            let dataset = DatasetReader::new(&data)
                .read()
                .context("failed to read input CSV")?;

            let fitted = DecisionTreeConfig::new()
                .with_n_features(tree.n_features.as_option())
                .with_max_depth(tree.max_depth)
                .with_min_samples(tree.min_samples)
                .with_seed(cli.seed)
                .fit(&dataset)
                .context("tree training failed")?;
            info!(
                depth = fitted.depth(),
                n_nodes = fitted.n_nodes(),
                n_leaves = fitted.n_leaves(),
                "tree trained"
            );

            print!("{}", fitted.render());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sylva").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn feature_count_parses_number_and_all() {
        assert_eq!("3".parse::<FeatureCount>(), Ok(FeatureCount::Count(3)));
        assert_eq!("all".parse::<FeatureCount>(), Ok(FeatureCount::All));
        assert_eq!(FeatureCount::All.as_option(), None);
        assert!("two".parse::<FeatureCount>().is_err());
    }

    #[test]
    fn evaluate_uses_shared_tree_defaults() {
        let cli = parse(&["evaluate", "--data", "iris.csv"]);
        let Command::Evaluate {
            n_trees,
            n_bootstrap,
            test_size,
            tree,
            ..
        } = cli.command
        else {
            panic!("expected evaluate");
        };
        assert_eq!((n_trees, n_bootstrap, test_size), (4, 800, 0.2));
        assert_eq!(tree.n_features, FeatureCount::Count(2));
        assert_eq!((tree.max_depth, tree.min_samples), (4, 2));
    }

    #[test]
    fn evaluate_can_consider_all_features() {
        let cli = parse(&[
            "evaluate",
            "--data",
            "iris.csv",
            "--n-features",
            "all",
            "--max-depth",
            "6",
        ]);
        let Command::Evaluate { tree, .. } = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(tree.n_features.as_option(), None);
        assert_eq!(tree.max_depth, 6);
    }

    #[test]
    fn tree_subcommand_shares_flags() {
        let cli = parse(&["tree", "--data", "iris.csv", "--n-features", "1", "--seed", "9"]);
        assert_eq!(cli.seed, 9);
        let Command::Tree { tree, .. } = cli.command else {
            panic!("expected tree");
        };
        assert_eq!(tree.n_features, FeatureCount::Count(1));
    }
}
