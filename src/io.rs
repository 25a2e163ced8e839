use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::evaluator::{EvalConfig, EvaluationResult, FrameRecord};

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize, P: AsRef<Path>>(output_path: P, object: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(object)?;
    std::fs::write(output_path, j)?;
    Ok(())
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<T> {
    let contents = std::fs::read_to_string(file_path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn write_frame_log<P: AsRef<Path>>(output_path: P, records: &[FrameRecord]) -> Result<()> {
    object_to_json(output_path, &records)
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    timestamp: String,
    config: &'a EvalConfig,
    frames_evaluated: usize,
    #[serde(flatten)]
    result: &'a EvaluationResult,
}

/// Writes the aggregate metrics together with the config that produced them.
pub fn write_detailed_report<P: AsRef<Path>>(
    output_path: P,
    result: &EvaluationResult,
    config: &EvalConfig,
    frames_evaluated: usize,
) -> Result<()> {
    use std::time::SystemTime;

    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let report = EvaluationReport {
        timestamp: timestamp.to_string(),
        config,
        frames_evaluated,
        result,
    };
    object_to_json(output_path, &report)
}

/// Plain-text PCP table: one column per actor, one row per bone group.
pub fn format_report(result: &EvaluationResult) -> String {
    let mut s = format!("{:<12}", "Bone Group");
    for a in 0..result.actor_pcp.len() {
        s += format!("{:>10}", format!("Actor {}", a + 1)).as_str();
    }
    s += "\n";
    for group in &result.bone_person_pcp {
        s += format!("{:<12}", group.name).as_str();
        for v in &group.actor_pcp {
            s += format!("{:>10.2}", v * 100.0).as_str();
        }
        s += "\n";
    }
    s += format!("{:<12}", "Total").as_str();
    for v in &result.actor_pcp {
        s += format!("{:>10.2}", v * 100.0).as_str();
    }
    s += "\n\n";
    s += format!("Average PCP: {:.2}\n", result.avg_pcp * 100.0).as_str();
    s += format!(
        "Recall:      {:.4} ({}/{})\n",
        result.recall, result.match_gt, result.total_gt
    )
    .as_str();
    s
}

pub fn write_report<P: AsRef<Path>>(output_path: P, result: &EvaluationResult) -> Result<()> {
    std::fs::write(output_path, format_report(result))?;
    Ok(())
}
