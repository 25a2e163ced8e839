pub mod data_loader;
pub mod error;
pub mod evaluator;
pub mod io;
pub mod metrics;
pub mod remap;
pub mod skeleton;
pub mod types;

pub use error::{EvalError, Result};
pub use evaluator::{EvalConfig, EvaluationResult, FrameRecord, SequenceEvaluator, evaluate_sequence};
pub use remap::coco_to_shelf;
pub use types::{FrameInput, GroundTruthSequence, Pose3D, Prediction};
