use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::actuator::simulator::SimulatedDeck;
use crate::parameters::{load_parameters_from_disk, save_parameters_to_disk, RunParameters};
use crate::protocol::Protocol;

mod actuator;
mod constants;
mod parameters;
mod protocol;
mod recipe;
mod reservoir;

/// Runs the crystallization-plate coloring protocol against a simulated
/// deck: bulk dye fill, remix, then protein/precipitant dosing.
#[derive(Debug, Parser)]
struct Args {
    /// Directory holding parameters.json; defaults apply when it is missing.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Write the default parameters file to the data directory and exit.
    #[arg(long)]
    init_parameters: bool,

    /// Multiplier applied to settling delays; 0 skips waiting entirely.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.init_parameters {
        save_parameters_to_disk(&RunParameters::default(), &args.data_dir);
        return ExitCode::SUCCESS;
    }

    let parameters = load_parameters_from_disk(&args.data_dir);
    let protocol = match Protocol::new(parameters) {
        Ok(protocol) => protocol,
        Err(e) => {
            log::error!("Invalid run parameters: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut deck = SimulatedDeck::new(args.time_scale);
    match protocol.run(&mut deck).await {
        Ok(report) => {
            log::info!("Protocol complete");
            log::info!("magenta left: {:.1} mL", report.magenta_ul / 1000.0);
            log::info!("teal left:    {:.1} mL", report.teal_ul / 1000.0);
            log::info!("water left:   {:.1} mL", report.water_ul / 1000.0);
            log::info!("yellow left:  {:.1} mL", report.yellow_ul / 1000.0);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Protocol aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
