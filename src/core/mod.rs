//! Core modules for deskwatch

pub mod orientation;
pub mod store;
pub mod reconciler;
pub mod scoring;
pub mod detector;
pub mod converter;
pub mod pipeline;
pub mod api;

pub use orientation::{normalize, rotate_to_portrait};
pub use store::{LogStore, JsonFileStore, InMemoryStore};
pub use reconciler::{LogReconciler, Reconciliation, read_snapshot};
pub use scoring::{clutter_score, filter_confident, score_output, score_output_now};
pub use detector::{Detector, CommandDetector, FixedDetector};
pub use converter::{convert, convert_file, image_dimensions, write_json};
pub use pipeline::{update_log, run_pipeline};
pub use api::{create_router, router, run_server, AppState};
