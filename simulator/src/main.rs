use anyhow::Context;
use clap::Parser;
use generator::profile::Scenario;
use gui_bridge::bridge::GuiBridge;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::rate::FixedRate;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Fixed-rate driver for the moving-person detector")]
struct Args {
    /// Run the synthetic walking-person scenario and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 0.2)]
    cluster_threshold: f32,
    #[arg(long, default_value_t = 0.2)]
    detection_threshold: f32,
    #[arg(long, default_value_t = 0.7)]
    legs_distance_max: f32,
    #[arg(long, default_value_t = 10.0)]
    rate_hz: f32,
    /// Number of ticks in an offline run
    #[arg(long, default_value_t = 30)]
    ticks: usize,
    /// Where offline summaries are appended
    #[arg(long, default_value = "tools/data/offline_detection.log")]
    report: PathBuf,
    /// Serve the HTTP bridge and run the detector loop until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn watch_ctrl_c(running: Arc<AtomicBool>) -> anyhow::Result<()> {
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for signal handling")?;
    thread::spawn(move || {
        if let Err(err) = runtime.block_on(signal::ctrl_c()) {
            log::error!("awaiting Ctrl+C: {}", err);
        }
        running.store(false, Ordering::SeqCst);
    });
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.cluster_threshold,
            args.detection_threshold,
            args.legs_distance_max,
            args.rate_hz,
            args.ticks,
        )
    };
    workflow_config.validate()?;

    let mut runner = Runner::new(&workflow_config)?;
    let mut gui_bridge = GuiBridge::new(runner.inbox(), runner.metrics());
    let mut pacer = FixedRate::from_hz(workflow_config.rate_hz)?;

    if args.offline {
        let mut scenario = Scenario::new(workflow_config.generator.clone());
        let summary = runner.run(
            workflow_config.ticks,
            &mut pacer,
            &mut gui_bridge,
            |tick, inbox| scenario.feed(tick, inbox),
        )?;

        println!(
            "Offline run -> ticks {}, ticks with persons {}, persons {}, last goal {:?}",
            summary.ticks, summary.detection_ticks, summary.persons, summary.last_goal
        );
        gui_bridge.publish_status("Offline workflow results ready.");

        let metrics = runner.metrics().snapshot();
        let report = format!(
            "scenario={} ticks={} detection_ticks={} persons={} last_goal={:?} metrics={}\n",
            scenario
                .config()
                .scenario
                .as_deref()
                .unwrap_or("walking-person"),
            summary.ticks,
            summary.detection_ticks,
            summary.persons,
            summary.last_goal,
            serde_json::to_string(&metrics)?
        );
        if let Some(parent) = args.report.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&args.report)
            .with_context(|| format!("opening report {}", args.report.display()))?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        gui_bridge.serve(workflow_config.bind);
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");

        let running = Arc::new(AtomicBool::new(true));
        watch_ctrl_c(running.clone())?;
        info!("detector loop period {:?}", pacer.period());
        while running.load(Ordering::SeqCst) {
            runner.tick(&mut gui_bridge)?;
            pacer.sleep();
        }
        info!("detector loop stopped");
    }

    Ok(())
}
