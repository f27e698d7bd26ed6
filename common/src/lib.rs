//! Cert Verify Common Library
//!
//! CLIと共有される型とワークフロー状態機械

pub mod dashboard;
pub mod error;
pub mod extraction;
pub mod review;
pub mod router;
pub mod types;
pub mod upload;

pub use error::{Error, Result};
pub use extraction::{seed_fields, ExtractionStage};
pub use review::{CopyAck, Decision, ReviewStage};
pub use router::{Role, Screen};
pub use types::{
    Confidence, ExtractedField, FileRecord, FileStatus, VerificationContext,
    VerificationStatus, CERTIFICATE_ID_LABEL, DEFAULT_CATEGORY, UNKNOWN_CERTIFICATE_ID,
};
pub use upload::UploadStage;
