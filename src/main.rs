//! drf-scaffold CLI
//!
//! ```bash
//! # Generate factories, viewset tests and route tests from models.txt
//! drf-scaffold
//!
//! # Custom paths (the two-letter short flags -tr/-tv are accepted)
//! drf-scaffold -m app/models.txt -f tests/factories.py -tv tests/test_views.py -tr tests/test_routes.py
//!
//! # Only list and detail tests, JSON report on stdout
//! drf-scaffold --methods list,detail --json
//!
//! # Print the config file JSON schema
//! drf-scaffold schema config
//! ```

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use drf_scaffold::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generate factory, viewset and route test boilerplate for Django REST Framework.
#[derive(Parser)]
#[command(name = "drf-scaffold", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File with one model name per line [default: models.txt]
    #[arg(short = 'm', long)]
    models: Option<PathBuf>,

    /// Route tests output file, also -tr [default: out/test_routes_TEMP.py]
    ///
    /// Without `routes` in the config file the file holds one
    /// `test_<model>_routes` function per model instead of a single
    /// `test_routes` for an `actions` router.
    #[arg(long)]
    test_routes: Option<PathBuf>,

    /// Viewset tests output file, also -tv [default: out/test_viewsets.py]
    #[arg(long)]
    test_views: Option<PathBuf>,

    /// Factories output file [default: out/factories.py]
    #[arg(short = 'f', long)]
    factories: Option<PathBuf>,

    /// Config file [default: ./drf-scaffold.yaml when present]
    #[arg(short = 'c', long, env = "DRF_SCAFFOLD_CONFIG")]
    config: Option<PathBuf>,

    /// Test methods to generate, comma separated
    #[arg(long, value_parser = MethodSelector::parse_list)]
    methods: Option<MethodSelector>,

    /// How output files are written
    #[arg(long, value_enum)]
    sink: Option<SinkArg>,

    /// Directory with template overrides
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Prepend a generator/model-hash comment to every file
    #[arg(long)]
    provenance: bool,

    /// Print the generation report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a JSON schema
    Schema {
        #[arg(value_enum, default_value_t = SchemaKind::Config)]
        kind: SchemaKind,
    },
    /// Write a default drf-scaffold.yaml into the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    /// drf-scaffold.yaml
    Config,
    /// Output of --json
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum SinkArg {
    /// Collect in memory, write each file once
    Memory,
    /// Truncate, then append section by section
    Append,
}

impl From<SinkArg> for SinkMode {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Memory => SinkMode::Memory,
            SinkArg::Append => SinkMode::Append,
        }
    }
}

const LEGACY_FLAGS: [(&str, &str); 2] = [("-tr", "--test-routes"), ("-tv", "--test-views")];

/// Rewrite the two-letter short flags clap cannot express
///
/// `-tr PATH`, `-tr=PATH` and `-trPATH` all reach clap as `--test-routes`
/// (likewise `-tv`). Attached values must be UTF-8; everything after `--`
/// is left alone.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut escaped = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if escaped {
                return arg;
            }
            if arg == "--" {
                escaped = true;
                return arg;
            }
            rewrite_legacy_flag(&arg).unwrap_or(arg)
        })
        .collect()
}

fn rewrite_legacy_flag(arg: &OsStr) -> Option<OsString> {
    let text = arg.to_str()?;
    LEGACY_FLAGS.iter().find_map(|(short, long)| {
        let rest = text.strip_prefix(short)?;
        if rest.is_empty() {
            return Some(OsString::from(*long));
        }
        let value = rest.strip_prefix('=').unwrap_or(rest);
        Some(OsString::from(format!("{}={}", long, value)))
    })
}

/// Respects `RUST_LOG`; otherwise `debug` with `--verbose`, `warn` by default.
/// Logs go to stderr so stdout stays clean for reports.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(cli.verbose, cli.no_color);

    let result = match &cli.command {
        Some(Commands::Schema { kind }) => cmd_schema(*kind),
        Some(Commands::Init { force }) => cmd_init(*force),
        None => cmd_generate(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn cmd_generate(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ScaffoldConfig::load(path)?,
        None => ScaffoldConfig::discover(&std::env::current_dir()?)?,
    };

    let config = config.merge(Overrides {
        models: cli.models.clone(),
        factories: cli.factories.clone(),
        test_views: cli.test_views.clone(),
        test_routes: cli.test_routes.clone(),
        methods: cli.methods.clone(),
        sink: cli.sink.map(SinkMode::from),
        template_dir: cli.template_dir.clone(),
        provenance: cli.provenance,
    });

    let report = Assembler::new(config)?.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_report());
    }
    Ok(())
}

fn cmd_schema(kind: SchemaKind) -> Result<()> {
    let schema = match kind {
        SchemaKind::Config => schemars::schema_for!(ScaffoldConfig),
        SchemaKind::Report => schemars::schema_for!(GenerationReport),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    std::fs::write(&path, ScaffoldConfig::default().to_yaml()?)?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}
