use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lnb::dist::{Formula, postinstall};
use lnb::platform;
use lnb::runtime::{RealRuntime, Runtime};
use log::info;
use std::path::PathBuf;

/// Packaging helpers for lnb releases.
#[derive(Parser, Debug)]
#[command(name = "lnb-dist", version = lnb::VERSION, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place the platform binary shipped in an npm package at bin/lnb
    Postinstall {
        /// Package root (defaults to two levels above this executable)
        #[arg(long, env = "LNB_PACKAGE_DIR", value_name = "DIR")]
        package_dir: Option<PathBuf>,

        /// Platform name in npm convention (darwin, linux, win32)
        #[arg(long, value_name = "NAME")]
        os: Option<String>,

        /// Architecture name in npm convention (x64, arm64)
        #[arg(long, value_name = "NAME")]
        arch: Option<String>,
    },

    /// Render the Homebrew formula for a release
    Formula {
        /// Release version, with or without a leading `v`
        #[arg(long = "release", value_name = "VERSION")]
        release: String,

        /// Directory holding the release archives
        #[arg(long, value_name = "DIR", default_value = "dist")]
        dist_dir: PathBuf,

        /// Write the formula here instead of standard output
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = RealRuntime;
    match cli.command {
        Commands::Postinstall {
            package_dir,
            os,
            arch,
        } => {
            let package_dir = match package_dir {
                Some(dir) => dir,
                None => postinstall::default_package_dir(&runtime)?,
            };
            let (host_os, host_arch) = platform::host_node_names();
            let os = os.unwrap_or(host_os);
            let arch = arch.unwrap_or(host_arch);
            postinstall::run(&runtime, &package_dir, &os, &arch)?;
            Ok(())
        }
        Commands::Formula {
            release,
            dist_dir,
            output,
        } => {
            let text = Formula::new(&release)
                .with_checksums_from(&runtime, &dist_dir)?
                .render()?;
            match output {
                Some(path) => {
                    runtime
                        .write(&path, text.as_bytes())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote formula to {:?}", path);
                    println!("Formula written to {}", path.display());
                }
                None => print!("{}", text),
            }
            Ok(())
        }
    }
}
