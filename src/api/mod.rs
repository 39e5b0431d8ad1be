//! REST API client for the DocVault custody backend.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{
    AuditLog, Block, Document, DownloadPayload, SystemConfig, UploadRequest, ValidationError,
    ValidationReport,
};
