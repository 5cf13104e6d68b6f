use anyhow::Result;
use clap::Parser;
use remod_cli::args::CliArgs;
use remod_cli::driver;
use remod_transforms::rules;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    if args.list_rules {
        for name in rules::default_rule_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let summary = driver::run(&args)?;
    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// `REMOD_LOG` overrides; otherwise verbosity maps to warn/debug/trace.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("REMOD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
