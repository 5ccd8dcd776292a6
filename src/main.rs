use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use indicatif::MultiProgress;
use log::info;
use osdsim::simulation::{self, ExperimentResult};
use osdsim::{read_matrix_file, Cli, OsdDecoder};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let cli = Cli::parse();

    let path = match cli.matrix_path() {
        Ok(path) => path,
        Err(message) => {
            println!("{message}");
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    let generator = read_matrix_file(path)
        .with_context(|| format!("Could not load generator matrix from {}", path.display()))?;
    info!(
        "Loaded {}x{} generator matrix from {}",
        generator.rows(),
        generator.cols(),
        path.display()
    );

    let decoder = Arc::new(OsdDecoder::new(generator, cli.wmax)?);
    let config = cli.experiment_config();
    let progress = cli.verbose.then(MultiProgress::new);

    let results = simulation::run_all(decoder, &cli.ebn0, &config, progress.as_ref()).await?;
    report(&results);

    Ok(())
}

fn report(results: &[ExperimentResult]) {
    println!("E_b / N_0 (db) | Word/error rate");
    for result in results {
        println!("{:<16} {}", result.ebn0_db, result.word_error_rate());
    }
}
