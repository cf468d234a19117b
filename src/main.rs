use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rxmv_cli::action::{Policy, PromptConfirm};
use rxmv_cli::config::{MergedConfig, load_merged_config};
use rxmv_cli::report::{ColorMode, Reporter, Verbosity, render_processors};
use rxmv_cli::run::{RunOptions, resolve_root};
use rxmv_cli::transform::Registry;

/// Environment variable holding the tracing filter, e.g. `RXMV_LOG=rxmv_cli=debug`.
const LOG_ENV: &str = "RXMV_LOG";

#[derive(Parser)]
#[command(name = "rxmv")]
#[command(
	author,
	version,
	about = "Batch rename files using regex substitution and backreference processors"
)]
#[command(arg_required_else_help = true)]
#[command(
	after_help = "Flags only switch settings on. Defaults set to true in .rxmv.toml \
		cannot be turned off from the command line; use --no-config to ignore them."
)]
struct Cli {
	/// Verbose mode
	#[arg(short, long)]
	verbose: bool,

	/// Fine verbose mode: also report every candidate (implies --verbose)
	#[arg(long, visible_alias = "fine-verbose")]
	fineverbose: bool,

	/// Recursively check directories
	#[arg(short, long)]
	recursive: bool,

	/// Do everything but act on files
	#[arg(short = 'n', long)]
	noact: bool,

	/// Ask for confirmation before acting on each file
	#[arg(short, long)]
	confirm: bool,

	/// Do not overwrite existing files
	#[arg(short = 'o', long)]
	no_overwrite: bool,

	/// Print the full cause chain of failures
	#[arg(short, long)]
	stacks: bool,

	/// Working directory; reported paths are relative to it
	#[arg(short, long, value_name = "PATH", default_value = ".")]
	directory: PathBuf,

	/// Ignore .rxmv.toml files
	#[arg(long)]
	no_config: bool,

	/// When to color output: auto, always or never
	#[arg(long, value_name = "WHEN", default_value = "auto")]
	color: ColorMode,

	/// List the available processors and exit
	#[arg(long)]
	list_processors: bool,

	/// Regex a file name must match to be renamed
	#[arg(value_name = "SELECTOR", required_unless_present = "list_processors")]
	selector: Option<String>,

	/// New name; $N inserts capture group N after processing
	#[arg(value_name = "TARGET", required_unless_present = "list_processors")]
	target: Option<String>,

	/// Processors applied, in order, to every backreference
	#[arg(
		value_name = "PROCESSORS",
		required_unless_present = "list_processors",
		num_args = 1..
	)]
	processors: Vec<String>,
}

fn main() -> ExitCode {
	init_tracing();

	#[cfg(windows)]
	let _ = nu_ansi_term::enable_ansi_support();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	use tracing_subscriber::{EnvFilter, fmt, prelude::*};

	// Only initialize if RXMV_LOG is set
	if std::env::var_os(LOG_ENV).is_some() {
		let filter = EnvFilter::from_env(LOG_ENV);
		tracing_subscriber::registry()
			.with(
				fmt::layer()
					.with_writer(std::io::stderr)
					.with_target(true)
					.with_level(true),
			)
			.with(filter)
			.init();
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let root = resolve_root(&cli.directory)
		.with_context(|| format!("Invalid working directory: {}", cli.directory.display()))?;

	let config = if cli.no_config {
		MergedConfig::default()
	} else {
		load_merged_config(&root).context("Failed to load configuration")?
	};

	let registry =
		Registry::with_composites(&config.processors).context("Invalid processor configuration")?;

	// Handle --list-processors
	if cli.list_processors {
		print!("{}", render_processors(&registry));
		return Ok(ExitCode::SUCCESS);
	}

	handle_rename(cli, &root, &config, &registry)
}

fn handle_rename(
	cli: Cli,
	root: &Path,
	config: &MergedConfig,
	registry: &Registry,
) -> Result<ExitCode> {
	let defaults = config.defaults;
	let on = |flag: bool, default: Option<bool>| flag || default.unwrap_or(false);

	let fine = on(cli.fineverbose, defaults.fineverbose);
	let verbosity = if fine {
		Verbosity::Fine
	} else if on(cli.verbose, defaults.verbose) {
		Verbosity::Verbose
	} else {
		Verbosity::Quiet
	};

	let options = RunOptions {
		directory: cli.directory,
		selector: cli.selector.unwrap_or_default(),
		target: cli.target.unwrap_or_default(),
		processors: cli.processors,
		recursive: on(cli.recursive, defaults.recursive),
		policy: Policy {
			dry_run: on(cli.noact, defaults.noact),
			require_confirmation: on(cli.confirm, defaults.confirm),
			no_overwrite: on(cli.no_overwrite, defaults.no_overwrite),
		},
	};

	let reporter = Reporter::new(root, cli.color)
		.with_verbosity(verbosity)
		.with_stacks(on(cli.stacks, defaults.stacks));

	reporter.fine_logging();
	for source in &config.sources {
		tracing::debug!(?source, "using config");
	}

	let mut confirm = PromptConfirm::stdio(reporter.clone());
	let stats = rxmv_cli::run::run(&options, registry, &mut confirm, &reporter)
		.context("Failed to prepare rename")?;

	tracing::debug!(?stats, "run complete");
	Ok(ExitCode::SUCCESS)
}
