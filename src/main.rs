use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use cabinetkit::units::format_inches;
use cabinetkit::{init_logging, Config, CostPolicy, DesignerState, SettingsPersistence};

#[derive(Parser, Debug)]
#[command(name = "cabinetkit", version, about = "Parametric cabinet configurator")]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the platform config path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a design holding one default cabinet
    New {
        /// Target file, or a directory for a timestamped name
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// List the cabinets in a design
    Info {
        design: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the cost breakdown of a design
    Cost {
        design: PathBuf,
        /// Pricing policy, overriding the configured one
        #[arg(long)]
        policy: Option<CostPolicy>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render a PNG elevation of a design
    Snapshot {
        design: PathBuf,
        /// Target file, or a directory for a timestamped name
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match SettingsPersistence::open_default() {
            Ok(persistence) => Ok(persistence.config().clone()),
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Ok(Config::default())
            }
        },
    }
}

fn session(config: &Config) -> anyhow::Result<DesignerState> {
    let room = config.room_context().context("invalid room settings")?;
    Ok(DesignerState::with_settings(config.session_settings(), room))
}

fn open_design(config: &Config, path: &Path) -> anyhow::Result<DesignerState> {
    let mut state = session(config)?;
    state
        .load_from_file(path)
        .with_context(|| format!("failed to load design {}", path.display()))?;
    Ok(state)
}

fn is_file_target(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

fn print_info(state: &DesignerState) {
    println!("Design: {}", state.display_name());
    let room = state.room();
    println!(
        "Room: ceiling {} ft, 3D room {}, photo {}",
        room.ceiling_height_ft(),
        if room.is_3d_room_shown() { "shown" } else { "hidden" },
        match room.photo() {
            Some(photo) => {
                let (w, h) = photo.dimensions();
                format!("{}x{}", w, h)
            }
            None => "none".to_string(),
        }
    );
    println!("Cabinets: {}", state.cabinets().len());
    for cab in state.cabinets() {
        println!(
            "  #{} {} {} x {} x {}, {} {} ({}), {} shelves{}{}, at {}",
            cab.id(),
            cab.cabinet_type(),
            format_inches(cab.width_in()),
            format_inches(cab.height_in()),
            format_inches(cab.depth_in()),
            cab.color(),
            cab.material(),
            cab.finish(),
            cab.shelf_count(),
            if cab.is_hollow() { ", hollow" } else { "" },
            if cab.is_door_open() { ", door open" } else { "" },
            cab.position()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json)?;
    tracing::debug!("cabinetkit {} (built {})", cabinetkit::VERSION, cabinetkit::BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::New { output } => {
            let mut state = session(&config)?;
            let path = if is_file_target(&output, "json") {
                state
                    .save_to_file(&output)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                output
            } else {
                state
                    .save_to_dir(&output)
                    .with_context(|| format!("failed to write into {}", output.display()))?
            };
            println!("{}", path.display());
        }
        Command::Info { design, format } => {
            let state = open_design(&config, &design)?;
            match format {
                Format::Text => print_info(&state),
                Format::Json => println!("{}", state.to_design_file().to_json()?),
            }
        }
        Command::Cost {
            design,
            policy,
            format,
        } => {
            let state = open_design(&config, &design)?;
            let policy = policy.unwrap_or(state.settings.cost_policy);
            let breakdown = state.cost_with(policy);
            match format {
                Format::Text => {
                    println!("Policy: {}", policy);
                    println!("{}", breakdown);
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
            }
        }
        Command::Snapshot { design, output } => {
            let state = open_design(&config, &design)?;
            let path = if is_file_target(&output, "png") {
                state
                    .export_snapshot(&output)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                output
            } else {
                state
                    .export_snapshot_to_dir(&output)
                    .with_context(|| format!("failed to write into {}", output.display()))?
            };
            println!("{}", path.display());
        }
    }

    Ok(())
}
