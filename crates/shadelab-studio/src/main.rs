//! Shadelab - small rendering demos on the shadelab engine.
//!
//! ```bash
//! shadelab quadrants
//! shadelab solar --no-vsync
//! shadelab cone --segments 8 --log debug
//! ```

mod demos;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use winit::dpi::LogicalSize;

use shadelab_engine::device::GpuInit;
use shadelab_engine::logging::{init_logging, LoggingConfig};
use shadelab_engine::window::{Runtime, RuntimeConfig};

use demos::{ConeDemo, QuadrantsDemo, SolarDemo};

/// Shadelab - rendering demos
#[derive(Parser)]
#[command(name = "shadelab")]
#[command(about = "Scissored fills, a toy solar system and a flat/smooth shaded cone")]
#[command(version)]
struct Cli {
    /// Which demo to open
    #[arg(value_enum)]
    demo: Demo,

    /// Cone side triangles (cone demo only)
    #[arg(long, default_value_t = 32)]
    segments: u32,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Demo {
    Quadrants,
    Solar,
    Cone,
}

impl Demo {
    fn title(self) -> &'static str {
        match self {
            Demo::Quadrants => "shadelab: quadrants",
            Demo::Solar => "shadelab: solar system",
            Demo::Cone => "shadelab: cone",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());

    let config = RuntimeConfig {
        title: cli.demo.title().to_string(),
        initial_size: LogicalSize::new(f64::from(cli.width.max(1)), f64::from(cli.height.max(1))),
    };
    let gpu_init = GpuInit::default().with_vsync(!cli.no_vsync);

    log::info!("starting {:?} demo", cli.demo);

    match cli.demo {
        Demo::Quadrants => Runtime::run(config, gpu_init, QuadrantsDemo::new()),
        Demo::Solar => Runtime::run(config, gpu_init, SolarDemo::new()),
        Demo::Cone => {
            // Validate before a window opens so a bad count fails fast.
            let demo = ConeDemo::new(cli.segments)?;
            Runtime::run(config, gpu_init, demo)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["shadelab", "cone"]).unwrap();
        assert_eq!(cli.demo, Demo::Cone);
        assert_eq!(cli.segments, 32);
        assert!(!cli.no_vsync);
        assert_eq!((cli.width, cli.height), (800, 600));
    }

    #[test]
    fn cli_parses_options() {
        let cli = Cli::try_parse_from([
            "shadelab", "solar", "--segments", "8", "--log", "debug", "--no-vsync",
        ])
        .unwrap();
        assert_eq!(cli.demo, Demo::Solar);
        assert_eq!(cli.segments, 8);
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert!(cli.no_vsync);
    }

    #[test]
    fn cli_rejects_unknown_demo() {
        assert!(Cli::try_parse_from(["shadelab", "teapot"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
