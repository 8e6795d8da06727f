pub mod background;
pub mod bounded;
pub mod cluster;
pub mod ingest;
pub mod legs;
pub mod motion;
pub mod pairing;

pub use background::{BackgroundModel, BackgroundSnapshot};
pub use bounded::BoundedBuffer;
pub use cluster::{ClusterInput, ClusterStage};
pub use ingest::{Ingested, ScanIngestor};
pub use legs::LegStage;
pub use motion::{DynamicFlags, MotionInput, MotionStage};
pub use pairing::{Pairing, PairingStage};
