use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::mailbox::Inbox;
use log::{error, info};
use mpdcore::detector::DetectionSink;
use mpdcore::interface::{GoalPoint, MarkerFrame, MotionUpdate, ScanMessage};
use mpdcore::telemetry::MetricsRecorder;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

type SharedModel = Arc<RwLock<VisualizationModel>>;

fn read_model(state: &SharedModel) -> VisualizationModel {
    state
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// HTTP bridge: feeds posted messages into the inbox and serves the latest
/// published detections.
pub struct GuiBridge {
    state: SharedModel,
    inbox: Inbox,
    metrics: Arc<MetricsRecorder>,
}

impl GuiBridge {
    pub fn new(inbox: Inbox, metrics: Arc<MetricsRecorder>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            inbox,
            metrics,
        }
    }

    /// Starts the HTTP endpoint on its own thread.
    pub fn serve(&self, address: SocketAddr) {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let inbox = self.inbox.clone();
        let inbox_filter = warp::any().map(move || inbox.clone());
        let metrics = self.metrics.clone();
        let metrics_filter = warp::any().map(move || metrics.clone());

        let markers_route = warp::path("markers")
            .and(warp::path::end())
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| warp::reply::json(&read_model(&state).markers));

        let goal_route = warp::path("goal")
            .and(warp::path::end())
            .and(warp::get())
            .and(state_filter)
            .map(|state: SharedModel| warp::reply::json(&read_model(&state).goal));

        let metrics_route = warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(metrics_filter)
            .map(|metrics: Arc<MetricsRecorder>| warp::reply::json(&metrics.snapshot()));

        let scan_route = warp::path("scan")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(inbox_filter.clone())
            .map(|scan: ScanMessage, inbox: Inbox| {
                let replaced = inbox.scans.post(scan);
                warp::reply::with_status(
                    warp::reply::json(&json!({"status": "ok", "replaced": replaced})),
                    StatusCode::ACCEPTED,
                )
            });

        let motion_route = warp::path("robot_moving")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(inbox_filter)
            .map(|update: MotionUpdate, inbox: Inbox| {
                let replaced = inbox.motion.post(update);
                warp::reply::with_status(
                    warp::reply::json(&json!({"status": "ok", "replaced": replaced})),
                    StatusCode::ACCEPTED,
                )
            });

        thread::spawn(move || {
            let routes = markers_route
                .or(goal_route)
                .or(metrics_route)
                .or(scan_route)
                .or(motion_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
        info!("bridge listening on http://{}", address);
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        read_model(&self.state)
    }

    fn update(&self, apply: impl FnOnce(&mut VisualizationModel)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
    }
}

impl DetectionSink for GuiBridge {
    fn publish_goal(&mut self, goal: GoalPoint) {
        self.update(|model| model.apply_goal(goal));
    }

    fn publish_markers(&mut self, markers: &MarkerFrame) {
        self.update(|model| model.apply_markers(markers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::Scenario;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::rate::FixedRate;
    use crate::workflow::runner::Runner;

    #[test]
    fn gui_bridge_keeps_latest_detection() {
        let cfg = WorkflowConfig::default();
        let mut runner = Runner::new(&cfg).unwrap();
        let mut gui = GuiBridge::new(runner.inbox(), runner.metrics());
        let mut scenario = Scenario::new(cfg.generator.clone());
        let mut pacer = FixedRate::from_hz(1000.0).unwrap();

        let summary = runner
            .run(13, &mut pacer, &mut gui, |tick, inbox| scenario.feed(tick, inbox))
            .unwrap();

        let model = gui.snapshot();
        assert_eq!(model.goals_published, summary.detection_ticks);
        assert_eq!(model.goal, summary.last_goal);
        assert!(model.person_count >= 1);
        assert!(!model.markers.field_of_view.is_empty());
    }

    #[test]
    fn bridge_inbox_is_shared_with_the_runner() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(&cfg).unwrap();
        let gui = GuiBridge::new(runner.inbox(), runner.metrics());
        gui.inbox.motion.post(MotionUpdate::new(true));
        assert_eq!(runner.inbox().motion.take(), Some(MotionUpdate::new(true)));
    }
}
