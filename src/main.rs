use nbsim::{bench_variants, print_report, print_summary, resolve_variants, run_variant};
use nbsim::{RunConfig, Variant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;

use std::path::PathBuf;

const DEFAULT_FILE: &str = "default.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Five-body gravity kernel and its optimized variants")]
struct Args {
    /// Run configuration under scenarios/ (or a path to one).
    #[arg(short, long, default_value = DEFAULT_FILE)]
    file: String,

    /// Variant to run; repeat to run several. Overrides the file.
    #[arg(short, long)]
    variant: Vec<String>,

    /// Number of times advance is called.
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Number of times each variant is run.
    #[arg(short, long)]
    count: Option<u32>,

    /// List variants and exit.
    #[arg(long, default_value_t = false)]
    list: bool,
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<RunConfig> {
    let direct = PathBuf::from(&args.file);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file)
    };

    let mut cfg = if !config_path.is_file() && args.file == DEFAULT_FILE {
        debug!("no {DEFAULT_FILE} found, using built-in defaults");
        RunConfig::default()
    } else {
        RunConfig::from_path(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
    };

    if !args.variant.is_empty() {
        cfg.harness.variants = args.variant.clone();
    }
    if let Some(n) = args.iterations {
        cfg.harness.iterations = n;
    }
    if let Some(c) = args.count {
        cfg.harness.count = c;
    }
    cfg.validate()?;

    debug!("{cfg:?}");
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list {
        for v in Variant::ALL {
            println!("\t{:<10} = {}", v.name(), v.description());
        }
        return Ok(());
    }

    let cfg = load_config(&args)?;
    let params = cfg.kernel_params();

    let (variants, rejected) = resolve_variants(&cfg.harness.variants);
    for e in &rejected {
        println!("{e}");
    }
    if variants.is_empty() {
        bail!("no valid variants to run");
    }

    if cfg.harness.count == 1 {
        for v in variants {
            print_report(&run_variant(v, &params, cfg.harness.iterations));
        }
    } else {
        let summaries = bench_variants(&variants, &params, cfg.harness.iterations, cfg.harness.count);
        print_summary(&summaries);
    }

    println!("Finished");
    Ok(())
}
