use nalgebra as na;

use crate::error::{EvalError, Result};
use crate::skeleton::{NUM_COCO_JOINTS, ShelfJoint};

/// A single 3D pose, one point per joint, in millimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose3D {
    joints: Vec<na::Vector3<f64>>,
}

impl Pose3D {
    pub fn new(joints: Vec<na::Vector3<f64>>) -> Pose3D {
        Pose3D { joints }
    }

    pub fn zeros(num_joints: usize) -> Pose3D {
        Pose3D {
            joints: vec![na::Vector3::zeros(); num_joints],
        }
    }

    /// Builds a pose from row data, checking the joint count.
    ///
    /// Rows need at least 3 columns; anything after the third (scores,
    /// visibility) is ignored.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], expected_joints: usize) -> Result<Pose3D> {
        if rows.len() != expected_joints {
            return Err(EvalError::Shape(format!(
                "expected {} joints, got {}",
                expected_joints,
                rows.len()
            )));
        }
        Self::parse_rows(rows)
    }

    fn parse_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Pose3D> {
        let joints = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let r = r.as_ref();
                if r.len() < 3 {
                    Err(EvalError::Shape(format!(
                        "joint {} has {} columns, need 3",
                        i,
                        r.len()
                    )))
                } else {
                    Ok(na::Vector3::new(r[0], r[1], r[2]))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Pose3D { joints })
    }

    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    pub fn joints(&self) -> &[na::Vector3<f64>] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [na::Vector3<f64>] {
        &mut self.joints
    }

    /// Joint lookup for poses in Shelf order.
    pub fn joint(&self, joint: ShelfJoint) -> &na::Vector3<f64> {
        &self.joints[joint.index()]
    }

    pub fn midpoint(&self, a: ShelfJoint, b: ShelfJoint) -> na::Vector3<f64> {
        (self.joint(a) + self.joint(b)) / 2.0
    }

    pub fn scaled(mut self, scale: f64) -> Pose3D {
        self.joints.iter_mut().for_each(|p| *p *= scale);
        self
    }

    pub fn to_rows(&self) -> Vec<[f64; 3]> {
        self.joints.iter().map(|p| [p.x, p.y, p.z]).collect()
    }
}

/// A predicted COCO-order pose with its validity score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub pose: Pose3D,
    pub score: f64,
}

impl Prediction {
    pub fn new(pose: Pose3D, score: f64) -> Prediction {
        Prediction { pose, score }
    }

    /// Parses a 17x4 (or 17x3) prediction row block.
    ///
    /// The fourth column of the first joint carries the validity score; a
    /// negative value marks a padded, invalid slot. 17x3 input is always valid.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Prediction> {
        let pose = Pose3D::from_rows(rows, NUM_COCO_JOINTS)?;
        let score = rows[0].as_ref().get(3).copied().unwrap_or(0.0);
        Ok(Prediction { pose, score })
    }

    pub fn is_valid(&self) -> bool {
        self.score >= 0.0
    }
}

/// Ground truth indexed `[actor][frame]`. `None` marks an absent actor.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthSequence {
    pub actors: Vec<Vec<Option<Pose3D>>>,
}

impl GroundTruthSequence {
    pub fn new(actors: Vec<Vec<Option<Pose3D>>>) -> GroundTruthSequence {
        GroundTruthSequence { actors }
    }

    pub fn num_actors(&self) -> usize {
        self.actors.len()
    }

    /// Frames available for every actor.
    pub fn num_frames(&self) -> usize {
        self.actors.iter().map(|a| a.len()).min().unwrap_or(0)
    }

    pub fn frame(&self, frame: usize) -> Result<Vec<Option<&Pose3D>>> {
        let len = self.num_frames();
        if frame >= len {
            return Err(EvalError::MissingFrame { frame, len });
        }
        Ok(self.actors.iter().map(|a| a[frame].as_ref()).collect())
    }
}

/// Everything the evaluator needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameInput<'a> {
    /// One slot per actor; `None` for absent actors.
    pub ground_truth: Vec<Option<&'a Pose3D>>,
    pub predictions: &'a [Prediction],
    pub image_paths: Vec<String>,
}

impl<'a> FrameInput<'a> {
    pub fn new(ground_truth: Vec<Option<&'a Pose3D>>, predictions: &'a [Prediction]) -> Self {
        FrameInput {
            ground_truth,
            predictions,
            image_paths: Vec::new(),
        }
    }

    pub fn with_image_paths(mut self, image_paths: Vec<String>) -> Self {
        self.image_paths = image_paths;
        self
    }
}
