use std::fs::{create_dir_all, File};
use std::path::Path;

use serde::{Deserialize, Serialize};

const PARAMETERS_FILE: &str = "parameters.json";
const PARAMETERS_BACKUP_FILE: &str = "parameters.json.bak";

/// Operator-tunable settings for one protocol run. Everything geometric
/// (depths, offsets, deck layout) stays in [`crate::constants`]; this only
/// covers what changes between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    /// Starting volume of each dye tube, in mL.
    pub starting_volumes: StartingVolumes,
    /// Settling delay after every hardware command, in seconds.
    pub settle_delay_s: f64,
    pub recipe: RecipeParameters,
    /// Well addresses to process, e.g. `["A1", "B3"]`. Empty means the
    /// whole plate, in plate order.
    pub wells: Vec<String>,
}

impl Default for RunParameters {
    fn default() -> RunParameters {
        RunParameters {
            starting_volumes: StartingVolumes::default(),
            settle_delay_s: 3.0,
            recipe: RecipeParameters::default(),
            wells: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingVolumes {
    pub magenta_ml: f64,
    pub teal_ml: f64,
    pub water_ml: f64,
    pub yellow_ml: f64,
}

impl Default for StartingVolumes {
    fn default() -> StartingVolumes {
        StartingVolumes {
            magenta_ml: 49.0,
            teal_ml: 49.0,
            water_ml: 49.0,
            yellow_ml: 49.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeParameters {
    /// Red volume added per plate row, in uL.
    pub red_step_ul: f64,
    /// Blue volume added per plate column, in uL.
    pub blue_step_ul: f64,
    /// Total dye volume each well receives during the bulk fill, in uL.
    pub total_well_ul: f64,
}

impl Default for RecipeParameters {
    fn default() -> RecipeParameters {
        RecipeParameters {
            red_step_ul: 50.0,
            blue_step_ul: 30.0,
            total_well_ul: 400.0,
        }
    }
}

pub fn load_parameters_from_disk(data_dir: &Path) -> RunParameters {
    let parameters_file = &data_dir.join(PARAMETERS_FILE);
    match read_parameters(parameters_file) {
        Ok(parameters) => parameters,
        Err(e) => {
            let parameters_backup_file = &data_dir.join(PARAMETERS_BACKUP_FILE);
            log::error!("Could not read parameters from {parameters_file:?}, using default parameters: {e}");
            if parameters_file.exists() {
                log::error!("Backupping {parameters_file:?} file to {parameters_backup_file:?}...");
                if let Err(e) = std::fs::rename(parameters_file, parameters_backup_file) {
                    log::error!("Could not create backup {parameters_backup_file:?}: {e:?}");
                }
            }
            RunParameters::default()
        }
    }
}

pub fn save_parameters_to_disk(parameters: &RunParameters, data_dir: &Path) {
    if let Err(e) = create_dir_all(data_dir) {
        log::error!("Could not create data directory {data_dir:?}: {e:?}");
        return;
    }
    let parameters_file = &data_dir.join(PARAMETERS_FILE);
    if let Err(e) = write_parameters(parameters, parameters_file) {
        log::error!("Could not serialize and save parameters to {parameters_file:?}: {e}");
    }
}

fn read_parameters(file: &Path) -> Result<RunParameters, String> {
    let file = File::open(file).map_err(|e| e.to_string())?;
    serde_json::from_reader(file).map_err(|e| e.to_string())
}

fn write_parameters(parameters: &RunParameters, file: &Path) -> Result<(), String> {
    let file = File::create(file).map_err(|e| e.to_string())?;
    serde_json::to_writer_pretty(file, parameters).map_err(|e| e.to_string())
}
