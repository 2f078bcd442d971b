use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use transcipher_oracle::config::{HarnessConfig, InstanceSize};
use transcipher_oracle::error::{error_codes, OracleError, OracleResult};
use transcipher_oracle::pipeline;
use transcipher_oracle::store::FsStore;
use transcipher_oracle::verify;

#[derive(Parser, Debug)]
#[command(
    name = "transcipher-oracle",
    version,
    about = "AES test vectors and correctness oracle for FHE transciphering benchmarks"
)]
struct Cli {
    /// Benchmark root holding datasets/ and io/ (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// JSON harness configuration providing defaults for root, instance and seed
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the cleartext dataset (db.txt)
    GenerateDataset {
        /// Instance size: 0 toy, 1 small, 2 medium, 3 large (default: from --config)
        size: Option<u32>,
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,
    },
    /// Derive key material from the seed and encrypt the dataset
    KeygenEncrypt {
        size: Option<u32>,
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,
    },
    /// Decrypt the ciphertext and write the reference outputs
    Reference { size: Option<u32> },
    /// Compare a result file against the expected file
    Verify { expected: PathBuf, result: PathBuf },
    /// Run dataset generation, encryption and reference in order
    Run {
        size: Option<u32>,
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,
    },
}

/// Merge command-line flags over the optional JSON configuration
///
/// Flags win; a missing `size` falls back to the configured instance.
fn build_config(cli: &Cli, size: Option<u32>, seed: Option<i64>) -> OracleResult<HarnessConfig> {
    let base = match &cli.config {
        Some(path) => Some(HarnessConfig::from_json_file(path)?),
        None => None,
    };
    let instance = match (size, &base) {
        (Some(size), _) => InstanceSize::from_discriminator(size)?,
        (None, Some(base)) => base.instance,
        (None, None) => {
            return Err(OracleError::invalid_parameter(
                "size",
                "a size argument or a --config file naming the instance",
                "none",
                error_codes::INVALID_INSTANCE_SIZE,
            ))
        }
    };
    let (base_root, base_seed) = match base {
        Some(base) => (base.root, base.seed),
        None => (PathBuf::from("."), None),
    };
    Ok(HarnessConfig {
        root: cli.root.clone().unwrap_or(base_root),
        instance,
        seed: seed.or(base_seed),
    })
}

fn run_stage(cli: &Cli) -> OracleResult<ExitCode> {
    match &cli.command {
        Command::GenerateDataset { size, seed } => {
            let config = build_config(cli, *size, *seed)?;
            let mut store = FsStore::new(config.data_dir());
            pipeline::generate_dataset(&config, &mut store)?;
        }
        Command::KeygenEncrypt { size, seed } => {
            let config = build_config(cli, *size, *seed)?;
            let mut store = FsStore::new(config.data_dir());
            pipeline::keygen_and_encrypt(&config, &mut store)?;
        }
        Command::Reference { size } => {
            let config = build_config(cli, *size, None)?;
            let mut store = FsStore::new(config.data_dir());
            pipeline::cleartext_reference(&config, &mut store)?;
        }
        Command::Run { size, seed } => {
            let config = build_config(cli, *size, *seed)?;
            let mut store = FsStore::new(config.data_dir());
            let outputs = pipeline::run_all(&config, &mut store)?;
            println!(
                "{}: max={} inner_product={} ({})",
                config.instance,
                outputs.max,
                outputs.inner_product,
                store.dir().display()
            );
        }
        Command::Verify { expected, result } => {
            let outcome = verify::verify_files(expected, result);
            println!("{}", outcome.report());
            return Ok(ExitCode::from(outcome.exit_code()));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run_stage(&cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{} (error code {})", e, e.error_code());
            eprintln!("{}", e.user_friendly_message());
            ExitCode::FAILURE
        }
    }
}
