use std::path::Path;
use std::time::Instant;

use clap::Parser;
use indicatif::ProgressBar;
use multiview_pose_eval::data_loader::{
    SHELF_FIRST_FRAME, SHELF_LAST_FRAME, SHELF_NUM_VIEWS, frame_image_paths, load_ground_truth,
    load_prediction_dir, load_predictions,
};
use multiview_pose_eval::io::{object_from_json, write_detailed_report, write_frame_log, write_report};
use multiview_pose_eval::{EvalConfig, SequenceEvaluator};

#[derive(Parser)]
#[command(version, about, author)]
struct ShelfEvalCli {
    /// ground truth json ({"actor3D": [...]})
    ground_truth: String,

    /// prediction json, or a folder with one json per frame
    predictions: String,

    /// dataset root used for per-frame image references
    #[arg(long, default_value = ".")]
    dataset_root: String,

    #[arg(long, default_value_t = SHELF_NUM_VIEWS)]
    num_views: usize,

    /// ground truth unit to millimeters
    #[arg(long, default_value_t = 1000.0)]
    gt_scale: f64,

    /// optional EvalConfig json; flags below override it
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    recall_threshold: Option<f64>,

    #[arg(long)]
    alpha_pcp: Option<f64>,

    #[arg(long)]
    num_scored_actors: Option<usize>,

    #[arg(long, default_value_t = SHELF_FIRST_FRAME)]
    frame_start: usize,

    /// inclusive
    #[arg(long, default_value_t = SHELF_LAST_FRAME)]
    frame_end: usize,

    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// match actors in parallel
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = ShelfEvalCli::parse();

    let mut config: EvalConfig = match &cli.config {
        Some(p) => object_from_json(p)?,
        None => EvalConfig::default(),
    };
    if let Some(v) = cli.recall_threshold {
        config.recall_threshold = v;
    }
    if let Some(v) = cli.alpha_pcp {
        config.alpha_pcp = v;
    }
    if let Some(v) = cli.num_scored_actors {
        config.num_scored_actors = v;
    }
    config.parallel_matching |= cli.parallel;

    let now = Instant::now();
    let ground_truth = load_ground_truth(&cli.ground_truth, cli.gt_scale)?;
    let predictions = if Path::new(&cli.predictions).is_dir() {
        load_prediction_dir(&cli.predictions)?
    } else {
        load_predictions(&cli.predictions)?
    };
    log::info!(
        "loaded {} actors x {} frames, {} prediction frames in {:.3} sec",
        ground_truth.num_actors(),
        ground_truth.num_frames(),
        predictions.len(),
        now.elapsed().as_secs_f64()
    );

    let frame_range: Vec<usize> = (cli.frame_start..=cli.frame_end).collect();
    let pb = ProgressBar::new(frame_range.len().min(predictions.len()) as u64);
    let mut evaluator = SequenceEvaluator::new(ground_truth.num_actors(), config);
    let records = evaluator.run(&ground_truth, &predictions, &frame_range, |fi| {
        pb.inc(1);
        frame_image_paths(&cli.dataset_root, fi, cli.num_views)
    })?;
    pb.finish_and_clear();
    let result = evaluator.finalize();
    log::info!("{}", result.summary());

    std::fs::create_dir_all(&cli.output_dir)?;
    let out = Path::new(&cli.output_dir);
    write_frame_log(out.join("frame_log.json"), &records)?;
    write_report(out.join("report.txt"), &result)?;
    write_detailed_report(out.join("report.json"), &result, evaluator.config(), records.len())?;
    println!("{}", multiview_pose_eval::io::format_report(&result));
    Ok(())
}
