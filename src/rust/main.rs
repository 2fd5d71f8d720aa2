use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use specialist::config::{DEFAULT_HOST, DEFAULT_PORT};
use specialist::training::{self, TrainingOptions, SAMPLE_SYMPTOMS};
use specialist::{
    matched_keyword, AppState, ModelManager, PredictionSource, ServiceConfig, SpecialistPredictor,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve predictions over HTTP
    Serve {
        /// Address to bind
        #[arg(long, env = "SPECIALIST_HOST", default_value = DEFAULT_HOST)]
        host: String,
        /// Port to bind
        #[arg(short, long, env = "SPECIALIST_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Directory holding the model artifacts
        #[arg(long, env = "SPECIALIST_MODEL_DIR", default_value = ".")]
        model_dir: PathBuf,
    },
    /// Train the model on the sample dataset and save its artifacts
    Train {
        /// Directory the model artifacts are written to
        #[arg(long, env = "SPECIALIST_MODEL_DIR", default_value = ".")]
        model_dir: PathBuf,
        /// Maximum vocabulary size
        #[arg(long, default_value_t = 100)]
        max_features: usize,
        /// Fraction of the dataset held out for evaluation
        #[arg(long, default_value_t = 0.2)]
        test_size: f64,
        /// Seed for the train/test shuffle
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Predict the specialist for a single symptom description
    Predict {
        /// Symptom description
        text: String,
        /// Directory holding the model artifacts
        #[arg(long, env = "SPECIALIST_MODEL_DIR", default_value = ".")]
        model_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    specialist::init_logger();
    let args = Args::parse();

    match args.command {
        Command::Serve { host, port, model_dir } => {
            let config = ServiceConfig {
                host,
                port,
                models_dir: model_dir,
            };
            specialist::server::run(config).await.context("ML service failed")?;
        }
        Command::Train {
            model_dir,
            max_features,
            test_size,
            seed,
        } => {
            let options = TrainingOptions {
                max_features,
                test_size,
                seed,
            };
            run_training(ModelManager::new(model_dir), &options)?;
        }
        Command::Predict { text, model_dir } => {
            let artifacts = ModelManager::new(model_dir).load_or_fallback();
            let state = AppState::from_artifacts(artifacts);
            let (specialization, source) = state.predict(&text).context("Prediction failed")?;

            println!("Recommended Specialist: {}", specialization);
            match source {
                PredictionSource::Model => println!("  Source: trained model"),
                PredictionSource::Keywords => match matched_keyword(&text) {
                    Some((_, keyword)) => println!("  Source: keyword '{}'", keyword),
                    None => println!("  Source: default (no keyword matched)"),
                },
            }
        }
    }

    Ok(())
}

fn run_training(manager: ModelManager, options: &TrainingOptions) -> anyhow::Result<()> {
    let start_time = Instant::now();
    info!("=== Training specialization model ===");

    let trained = training::train(&manager, options)
        .with_context(|| format!("Training failed for {:?}", manager.models_dir()))?;

    println!("Model Accuracy: {:.2}%", trained.evaluation.accuracy * 100.0);
    println!("\nClassification Report:");
    println!("{}", trained.evaluation);
    println!("Model and vectorizer saved to {:?}", manager.models_dir());

    let prediction = trained.artifacts.predict(SAMPLE_SYMPTOMS)?;
    println!("\nTest Prediction for '{}':", SAMPLE_SYMPTOMS);
    println!("Recommended Specialist: {}", prediction);

    info!("=== Training complete (took {:.2?}) ===", start_time.elapsed());
    Ok(())
}
