//! Neuralynx Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod store;
pub mod acquisition;
pub mod camera;
pub mod config;
pub mod prompts;
pub mod gemini;
pub mod extractor;
pub mod pipeline;
pub mod export;

pub use types::{ExtractionResult, ExtractionStatus, NewRecord, RecordId, RecordUpdate};
pub use error::{Error, ErrorKind, Result};
pub use store::{RecordSink, ResultStore, StatusCounts};
pub use acquisition::{capture_file_name, mime_type_from_path, validate_image_type, CAPTURE_MIME_TYPE};
pub use camera::{CameraPhase, CameraSession, MediaStreamHandle, StreamGuard};
pub use config::ExtractorConfig;
pub use prompts::{EXTRACTION_INSTRUCTION, NO_TEXT_PLACEHOLDER};
pub use extractor::TextExtractor;
pub use pipeline::{process_submission, Submission};
pub use export::{download_file_name, export_text};
