//! # CabinetKit
//!
//! A parametric cabinet configurator:
//! - Cabinets with editable dimensions, color, material, finish, type and shelves
//! - Room placement with wall mounting, ceiling checks and a photo backdrop
//! - Cost estimation under aluminum-frame or volumetric pricing
//! - JSON design files and PNG elevation snapshots
//!
//! ## Architecture
//!
//! CabinetKit is organized as a workspace with multiple crates:
//!
//! 1. **cabinetkit-core** - Errors, units, palette and material tables, points
//! 2. **cabinetkit-designer** - Cabinet model, placement, cost, room, design files, snapshots
//! 3. **cabinetkit-settings** - Configuration file and persistence
//! 4. **cabinetkit** - Logging setup and the command line binary

pub use cabinetkit_core::data;
pub use cabinetkit_core::units;
pub use cabinetkit_designer as designer;

pub use cabinetkit_core::{
    CabinetColor, CabinetError, CabinetType, DesignError, Error, Finish, Material,
    PlacementError, Point3, Result, RoomError,
};

pub use cabinetkit_designer::{
    Cabinet, CabinetParams, CostBreakdown, CostPolicy, CostRates, DesignFile, DesignerState,
    PlacementEngine, RoomContext, SceneChange, SceneRenderer,
};

pub use cabinetkit_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Log output goes to stderr so command output on stdout stays clean.
/// `RUST_LOG` is honored; INFO is the default directive. With `json` set,
/// records are emitted as JSON lines.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
