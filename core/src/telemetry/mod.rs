pub mod log;
pub mod metrics;

pub use self::log::{InputStream, LogManager, ReadinessLog};
pub use self::metrics::{MetricsRecorder, MetricsSnapshot};
