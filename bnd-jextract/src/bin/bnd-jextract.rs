//! CLI entry point for bnd-jextract.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bnd_jextract::host::{BuildHost, HostWiring};
use clap::Parser;

/// bnd-jextract — generate Java bindings for C headers with jextract.
#[derive(Parser, Debug)]
#[command(name = "bnd-jextract", version, about)]
struct Cli {
    /// Path to the bnd-jextract.toml configuration file.
    #[arg(default_value = "bnd-jextract.toml")]
    config: PathBuf,

    /// JDK home containing bin/jextract (overrides config).
    #[arg(long)]
    toolchain: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the source/classpath wiring for the host build as TOML.
    #[arg(long)]
    print_wiring: bool,
}

/// Host used from the command line: there is no build graph to patch, so
/// the wiring is optionally printed for the caller to apply.
struct CliHost {
    print: bool,
}

impl BuildHost for CliHost {
    fn wire(&mut self, wiring: &HostWiring) -> Result<()> {
        if self.print {
            let text = toml::to_string(wiring).context("serializing host wiring")?;
            print!("{text}");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bnd_jextract=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = bnd_jextract::Overrides {
        toolchain: cli.toolchain,
        output_dir: cli.output_dir,
    };
    let mut host = CliHost {
        print: cli.print_wiring,
    };
    bnd_jextract::run(&cli.config, &mut host, &overrides)?;
    Ok(())
}
