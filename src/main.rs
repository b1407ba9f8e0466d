use anyhow::Context;
use dutch3d::{
    cli::{self, ArgsError, LaunchMode},
    config::ViewerConfig,
};

fn main() -> anyhow::Result<()> {
    dutch3d::init_logging();

    let args = match cli::parse() {
        Ok(args) => args,
        // --help, --version and parser errors print themselves
        Err(ArgsError::Cli(e)) => e.exit(),
        Err(e) => return Err(e).context("invalid arguments"),
    };

    if args.mode == LaunchMode::GlobeOnly {
        println!("{}", cli::USAGE);
    }
    if let Some(coordinate) = args.coordinate() {
        tracing::info!(
            latitude = coordinate.latitude_deg,
            longitude = coordinate.longitude_deg,
            "parsed coordinate"
        );
    }

    pollster::block_on(dutch3d::run(ViewerConfig::default(), args.coordinate()))
}
