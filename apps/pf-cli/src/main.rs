use clap::{Args, Parser, Subcommand, ValueEnum};
use pf_app::{
    AppConfig, AppError, AppResult, CalculationInput, CalculationService, SweepDefinition, SweepSpacing,
};
use pf_fluids::Species;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PipeFlow CLI - Pressure drop in a single straight pipe", long_about = None)]
struct Cli {
    /// Service configuration (YAML or JSON); defaults to $PIPEFLOW_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format for results
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: OutputFormat,
    /// Debug logging (same as DEBUG=true)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the pressure drop for one operating point
    Calc {
        #[command(flatten)]
        pipe: PipeArgs,
        /// Mean flow velocity [m/s]
        #[arg(long)]
        velocity: f64,
    },
    /// Calculate from a request file (YAML or JSON)
    CalcFile {
        /// Path to the request file
        path: PathBuf,
    },
    /// Sweep velocity over a fixed pipe and fluid state
    Sweep {
        #[command(flatten)]
        pipe: PipeArgs,
        /// First velocity [m/s]
        #[arg(long)]
        v_start: f64,
        /// Last velocity [m/s]
        #[arg(long)]
        v_end: f64,
        /// Number of points
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
    },
    /// Service status, version and supported fluids
    Health,
    /// List supported fluids
    Fluids,
}

#[derive(Args, Debug, Clone)]
struct PipeArgs {
    /// CoolProp fluid name (e.g. Methane, Water)
    #[arg(long)]
    fluid: String,
    /// Absolute pressure [Pa]
    #[arg(long)]
    pressure: f64,
    /// Temperature [K]
    #[arg(long)]
    temperature: f64,
    /// Pipe outer diameter [m]
    #[arg(long)]
    diameter: f64,
    /// Pipe length [m]
    #[arg(long, default_value_t = 100.0)]
    length: f64,
    /// Sum of fitting loss coefficients
    #[arg(long, default_value_t = 0.0)]
    fittings_k: f64,
    /// Wall thickness override [m]
    #[arg(long)]
    wall_thickness: Option<f64>,
    /// Absolute roughness override [m]
    #[arg(long)]
    roughness: Option<f64>,
}

impl PipeArgs {
    fn to_input(&self, velocity: f64) -> CalculationInput {
        CalculationInput {
            wall_thickness: self.wall_thickness,
            roughness: self.roughness,
            ..CalculationInput::new(
                self.fluid.clone(),
                self.pressure,
                self.temperature,
                self.diameter,
                velocity,
            )
            .with_length(self.length)
            .with_fittings_k(self.fittings_k)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let response = err.to_response();
            match serde_json::to_string_pretty(&response) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}", response.detail),
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose` / `DEBUG=true`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose || debug_env_enabled() {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn debug_env_enabled() -> bool {
    std::env::var("DEBUG").is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn run(cli: &Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env()?,
    };
    tracing::debug!(
        config = ?cli.config,
        friction = %config.friction,
        "Loaded service configuration"
    );
    let service = CalculationService::new(config)?;

    match &cli.command {
        Commands::Calc { pipe, velocity } => {
            cmd_calc(&service, &pipe.to_input(*velocity), cli.format)
        }
        Commands::CalcFile { path } => cmd_calc(&service, &read_input(path)?, cli.format),
        Commands::Sweep {
            pipe,
            v_start,
            v_end,
            points,
            log,
        } => {
            let sweep = sweep_definition(*v_start, *v_end, *points, *log)?;
            cmd_sweep(&service, &pipe.to_input(*v_start), &sweep)
        }
        Commands::Health => emit(&service.health(), cli.format),
        Commands::Fluids => {
            cmd_fluids(service.config());
            Ok(())
        }
    }
}

fn cmd_calc(
    service: &CalculationService,
    input: &CalculationInput,
    format: OutputFormat,
) -> AppResult<()> {
    let result = service.calculate(input)?;
    emit(&result, format)
}

fn cmd_sweep(
    service: &CalculationService,
    input: &CalculationInput,
    sweep: &SweepDefinition,
) -> AppResult<()> {
    let rows = service.sweep_velocity(input, sweep)?;

    println!("{} - {}", input.fluid, sweep);
    println!(
        "{:>10}  {:>14}  {:>12}  {:>10}  {:<12}  warnings",
        "v [m/s]", "dP [Pa]", "Re", "f", "regime"
    );
    for row in &rows {
        match &row.outcome {
            Ok(result) => println!(
                "{:>10.4}  {:>14.2}  {:>12}  {:>10.6}  {:<12}  {}",
                row.velocity,
                result.delta_p,
                result.reynolds,
                result.friction_factor,
                result.regime.label(),
                result.warnings.join(" | ")
            ),
            Err(err) => println!("{:>10.4}  error: {}", row.velocity, err.to_response().detail),
        }
    }
    Ok(())
}

fn cmd_fluids(config: &AppConfig) {
    println!("Supported fluids:");
    for name in &config.supported_fluids {
        match Species::from_coolprop_name(name) {
            Some(species) => println!("  {} ({})", name, species.display_name()),
            None => println!("  {}", name),
        }
    }
}

fn read_input(path: &Path) -> AppResult<CalculationInput> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn sweep_definition(
    v_start: f64,
    v_end: f64,
    points: usize,
    log: bool,
) -> AppResult<SweepDefinition> {
    let spacing = if log {
        SweepSpacing::Logarithmic
    } else {
        SweepSpacing::Linear
    };
    Ok(SweepDefinition::new(v_start, v_end, points, spacing)?)
}

/// Failures here are ours, not the caller's.
fn render<T: Serialize>(value: &T, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(AppError::output),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(AppError::output),
    }
}

fn emit<T: Serialize>(value: &T, format: OutputFormat) -> AppResult<()> {
    println!("{}", render(value, format)?);
    Ok(())
}
