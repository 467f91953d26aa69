use anyhow::{Context, Result, bail};
use clap::{ArgAction, CommandFactory, Parser};
use lnb::commands;
use lnb::paths::Settings;
use lnb::platform::Os;
use lnb::runtime::RealRuntime;
use std::ffi::OsString;
use std::path::PathBuf;

/// Make command-line tools reachable from anywhere.
///
/// Binaries are linked (macOS/Linux) or wrapped in a .cmd script (Windows)
/// inside a directory on PATH. Aliases turn any command line into a
/// script of its own. Only files created by lnb are ever removed by lnb.
///
/// Examples:
///   lnb ./target/release/mytool          # Same as `lnb install ./target/release/mytool`
///   lnb alias ll ls -la                  # Create an alias
///   lnb alias serve "node ./server.js"   # Relative paths become absolute
///   lnb list
#[derive(Parser, Debug)]
#[command(
    name = "lnb",
    about,
    long_about,
    before_help = concat!("LNB v", env!("LNB_VERSION"), " - Link Binary"),
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Directory for links and wrapper scripts (also via LNB_BIN_DIR)
    #[arg(long = "bin-dir", env = "LNB_BIN_DIR", value_name = "DIR", global = true)]
    bin_dir: Option<PathBuf>,

    /// Directory holding the lnb registry (also via LNB_HOME)
    #[arg(long = "config-dir", env = "LNB_HOME", value_name = "DIR", global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install a binary (prompts for the path when omitted)
    Install {
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Remove a binary installed by lnb
    Remove {
        #[arg(value_name = "NAME|PATH")]
        name: String,
    },

    /// Create an alias for a command (prompts when arguments are missing)
    Alias {
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// The command; remaining words are joined with spaces
        #[arg(
            value_name = "COMMAND",
            trailing_var_arg = true,
            allow_hyphen_values = true,
            num_args = 0..
        )]
        command: Vec<String>,
    },

    /// Remove an alias created by lnb
    Unalias {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List installed binaries and aliases
    List,

    /// Print version
    Version,

    /// Install the file at PATH; `lnb <path>` is rewritten to this
    #[command(name = SMART_INSTALL, hide = true)]
    SmartInstall {
        #[arg(value_name = "PATH")]
        path: String,
    },

    #[command(external_subcommand)]
    External(Vec<String>),
}

const SMART_INSTALL: &str = "smart-install";

/// Parse `argv`, reading `lnb <path> [options]` as `lnb smart-install <path> [options]`
/// so options after the path are honored and stray words are rejected.
fn parse_cli(argv: Vec<OsString>) -> Result<Cli, clap::Error> {
    let cli = Cli::try_parse_from(&argv)?;
    let Some(Commands::External(rest)) = &cli.command else {
        return Ok(cli);
    };

    // The external subcommand captures the path and everything after it
    let at = argv.len().saturating_sub(rest.len());
    let mut rewritten = argv;
    rewritten.insert(at, OsString::from(SMART_INSTALL));
    Cli::try_parse_from(rewritten)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Usage errors exit 1 like every other failure; help output exits 0
    let cli = match parse_cli(std::env::args_os().collect()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.version {
        print_version();
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let runtime = RealRuntime;
    let settings = || resolve_settings(cli.bin_dir.clone(), cli.config_dir.clone());

    match command {
        Commands::Version => {
            print_version();
            Ok(())
        }
        Commands::Install { path } => commands::install(runtime, path, settings()?),
        Commands::Remove { name } => commands::remove(runtime, &name, settings()?),
        Commands::Alias { name, command } => {
            commands::alias(runtime, name, command, settings()?)
        }
        Commands::Unalias { name } => commands::unalias(runtime, &name, settings()?),
        Commands::List => commands::list(runtime, settings()?),
        Commands::SmartInstall { path } => commands::smart_install(runtime, &path, settings()?),
        Commands::External(rest) => bail!("Unrecognized arguments: {}", rest.join(" ")),
    }
}

fn resolve_settings(bin_dir: Option<PathBuf>, config_dir: Option<PathBuf>) -> Result<Settings> {
    let os = Os::current().context("Unsupported operating system")?;
    Settings::resolve(&RealRuntime, os, bin_dir, config_dir)
}

fn print_version() {
    println!("LNB v{}", lnb::VERSION);
}
