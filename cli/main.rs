#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use somalabel::label::model::{BoostedTreeClassifier, ProbabilityClassifier};
use somalabel::label::{DEFAULT_THRESHOLD, count_passed, score_and_label};
use somalabel::prepare::build_features;
use somalabel::shared::table::{read_table, write_table};

#[derive(Args)]
pub struct PrepareArgs {
    /// Merged Mutect + LoFreq call table (TSV with header)
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the prepared feature table (TSV)
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct LabelArgs {
    /// Prepared feature table (TSV), usually the output of `prepare`
    #[arg(long)]
    pub input: PathBuf,

    /// Trained classifier in XGBoost JSON format
    #[arg(long)]
    pub model: PathBuf,

    /// Where to write the labeled table (TSV)
    #[arg(long)]
    pub output: PathBuf,

    /// Rows with a probability strictly above this value are labeled PASS
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,
}

#[derive(Parser)]
#[command(
    name = "somalabel",
    version,
    about = "Prepare classifier features from merged somatic variant calls and label them",
    long_about = "Derives a fixed numeric feature vector from merged Mutect and LoFreq calls, \
                  then scores each call with a trained gradient-boosted classifier and labels \
                  calls above a probability threshold as PASS."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive classifier features from a raw call table
    #[command(about = "Derive classifier features (outputs: prepared TSV)")]
    Prepare(PrepareArgs),

    /// Score a prepared table and label confident calls
    #[command(about = "Score and label calls (outputs: labeled TSV)")]
    Label(LabelArgs),
}

pub fn prepare(args: PrepareArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading calls from: {}", args.input.display());
    let raw = read_table(&args.input)?;
    println!("Loaded {} calls with {} columns", raw.height(), raw.width());

    let mut features = build_features(raw)?;

    write_table(&mut features, &args.output)?;
    println!("Prepared features saved to: {}", args.output.display());
    Ok(())
}

pub fn label(args: LabelArgs) -> Result<(), Box<dyn std::error::Error>> {
    // The model is loaded first so a bad artifact fails before any table work.
    println!("Loading model from: {}", args.model.display());
    let classifier = BoostedTreeClassifier::load(&args.model)?;
    println!(
        "Model expects {} features ({} trees)",
        classifier.feature_names().len(),
        classifier.num_trees()
    );

    println!("Loading features from: {}", args.input.display());
    let table = read_table(&args.input)?;

    let mut labeled = score_and_label(table, &classifier, args.threshold)?;
    let passed = count_passed(&labeled)?;
    println!(
        "Labeled {passed} of {} calls as PASS (threshold {})",
        labeled.height(),
        args.threshold
    );

    write_table(&mut labeled, &args.output)?;
    println!("Labeled calls saved to: {}", args.output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli { command } = Cli::parse();

    let result = match command {
        Some(Commands::Prepare(args)) => prepare(args),
        Some(Commands::Label(args)) => label(args),
        None => {
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {e}");
                process::exit(1);
            }
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
