use std::path::{Path, PathBuf};

use glob::glob;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::Deserialize;

use crate::error::Result;
use crate::skeleton::NUM_SHELF_JOINTS;
use crate::types::{GroundTruthSequence, Pose3D, Prediction};

/// First and last ground-truth frame of the Shelf evaluation split.
pub const SHELF_FIRST_FRAME: usize = 300;
pub const SHELF_LAST_FRAME: usize = 600;
pub const SHELF_NUM_VIEWS: usize = 5;

type Rows = Vec<Vec<f64>>;

#[derive(Deserialize)]
struct ActorsFile {
    #[serde(rename = "actor3D")]
    actor_3d: Vec<Vec<Rows>>,
}

pub fn shelf_frame_range() -> Vec<usize> {
    (SHELF_FIRST_FRAME..=SHELF_LAST_FRAME).collect()
}

/// Loads `{"actor3D": [[pose, ...], ...]}` (actors x frames).
///
/// An empty pose marks an absent actor. Coordinates are multiplied by `scale`;
/// the Shelf annotations are in meters, so 1000 gives millimeters.
pub fn load_ground_truth<P: AsRef<Path>>(path: P, scale: f64) -> Result<GroundTruthSequence> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let file: ActorsFile = serde_json::from_str(&contents)?;
    let actors = file
        .actor_3d
        .iter()
        .map(|frames| {
            frames
                .iter()
                .map(|rows| -> Result<Option<Pose3D>> {
                    if rows.is_empty() || rows[0].is_empty() {
                        Ok(None)
                    } else {
                        Ok(Some(Pose3D::from_rows(rows, NUM_SHELF_JOINTS)?.scaled(scale)))
                    }
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    log::trace!("loaded ground truth for {} actors", actors.len());
    Ok(GroundTruthSequence::new(actors))
}

fn frame_predictions(frame: &[Rows]) -> Result<Vec<Prediction>> {
    frame.iter().map(|rows| Prediction::from_rows(rows)).collect()
}

/// Loads all frames from one file: `[[pose, ...], ...]` (frames x poses).
pub fn load_predictions<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<Prediction>>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let frames: Vec<Vec<Rows>> = serde_json::from_str(&contents)?;
    frames.iter().map(|f| frame_predictions(f)).collect()
}

/// Loads one prediction file per frame from `dir`, ordered by file name.
pub fn load_prediction_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Vec<Prediction>>> {
    let pattern = format!("{}/*.json", dir.as_ref().display());
    let mut paths = glob(&pattern)?.collect::<std::result::Result<Vec<PathBuf>, _>>()?;
    paths.sort();
    log::trace!("loading {} prediction frames from {}", paths.len(), pattern);
    paths
        .par_iter()
        .progress_count(paths.len() as u64)
        .map(|p| {
            let contents = std::fs::read_to_string(p)?;
            let frame: Vec<Rows> = serde_json::from_str(&contents)?;
            frame_predictions(&frame)
        })
        .collect()
}

/// Per-view image paths of one frame: `Camera{k}/img_{frame:06}.png`.
pub fn frame_image_paths(dataset_root: &str, frame: usize, num_views: usize) -> Vec<String> {
    (0..num_views)
        .map(|cam| {
            Path::new(dataset_root)
                .join(format!("Camera{}", cam))
                .join(format!("img_{:06}.png", frame))
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}
