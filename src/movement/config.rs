//! Loader for the movement tuning RON file.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::resources::MovementTuning;

const TUNING_PATH: &str = "assets/data/movement.ron";

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load `MovementTuning` from a RON file. Fields left out of the file keep
/// their defaults.
pub fn load_tuning(path: &Path) -> Result<MovementTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron_options()
        .from_str(&contents)
        .map_err(|e| TuningLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

/// Startup system: overrides the default tuning from `assets/data/movement.ron`
/// when present. A missing or invalid file never aborts the app.
pub(crate) fn load_tuning_at_startup(mut tuning: ResMut<MovementTuning>) {
    let path = Path::new(TUNING_PATH);
    if !path.exists() {
        info!("No {} found, using built-in movement tuning", TUNING_PATH);
        return;
    }

    match load_tuning(path) {
        Ok(loaded) => {
            info!("Loaded movement tuning from {}", TUNING_PATH);
            *tuning = loaded;
        }
        Err(e) => warn!("{}; using built-in movement tuning", e),
    }
}
