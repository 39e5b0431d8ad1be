//! Wire types matching the custody backend's JSON contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document in custody. `block_id == None` means the document is still
/// pending: eligible for batching and individually deletable. Once sealed
/// into a block the backend owns it and the client treats it as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: u64,
    #[serde(default)]
    pub owner_id: String,
    /// Composite type tag: native MIME plus lowercase extension,
    /// e.g. `application/pdf.pdf`.
    pub file_type: String,
    /// Payload size in bytes.
    pub size: u64,
    pub created_at: DateTime<Utc>,
    /// Only present when the payload was explicitly fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_content: Option<String>,
    #[serde(default)]
    pub block_id: Option<u64>,
}

impl Document {
    pub fn is_pending(&self) -> bool {
        self.block_id.is_none()
    }

    /// Size in kilobytes for display.
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Singleton backend configuration. Read-only for this client; editing
/// lives in the admin surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    /// Minimum number of pending documents required to assemble a block.
    pub max_docs: u32,
    /// Advertised mining process time in seconds.
    pub process_time: u32,
    /// Mining difficulty: required leading zeros, passed through unmodified.
    pub quantity_of_zeros: u32,
}

/// A sealed batch of documents plus chain linkage and mining metadata.
/// `previous_hash` and `documents` never change after creation; the
/// remaining fields are populated when the block is mined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub documents: Vec<Document>,
    pub is_mined: bool,
    #[serde(default)]
    pub previous_hash: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub mined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub proof: Option<u64>,
    /// Mining duration reported by the backend.
    #[serde(default)]
    pub milliseconds: Option<u64>,
}

impl Block {
    /// Truncated hash for table display. `get` keeps this safe even if
    /// the backend ever returns a non-ASCII hash string.
    pub fn short_hash(&self) -> String {
        match &self.hash {
            Some(h) => match h.get(..12) {
                Some(prefix) if h.len() > 12 => format!("{prefix}..."),
                _ => h.clone(),
            },
            None => "-".to_string(),
        }
    }
}

/// Per-block detail from a failed chain validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "id")]
    pub block_id: u64,
    pub error: String,
}

/// Response of `GET /blocks/validate-chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

/// Body of `POST /documents/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub owner_id: String,
    pub file_type: String,
    pub size: u64,
    pub base64_content: String,
}

/// Response of `GET /documents/download/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPayload {
    pub base64_content: String,
    pub file_type: String,
}

/// Backend audit trail entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_pending_iff_no_block_id() {
        let json = r#"{
            "id": 7,
            "ownerId": "42",
            "fileType": "application/pdf.pdf",
            "size": 2048,
            "createdAt": "2026-08-12T10:41:02Z",
            "blockId": null
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.is_pending());
        assert!(doc.base64_content.is_none());

        let sealed = Document {
            block_id: Some(3),
            ..doc
        };
        assert!(!sealed.is_pending());
    }

    #[test]
    fn block_tolerates_unmined_fields() {
        let json = r#"{
            "id": 1,
            "createdAt": "2026-08-12T11:00:00Z",
            "documents": [],
            "isMined": false
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(!block.is_mined);
        assert_eq!(block.short_hash(), "-");
        assert!(block.mined_at.is_none());
    }

    #[test]
    fn short_hash_truncates_without_panicking_on_multibyte_input() {
        let mut block = Block {
            id: 1,
            created_at: chrono::Utc::now(),
            documents: Vec::new(),
            is_mined: true,
            previous_hash: None,
            hash: Some("0000ab12cd34ef56".to_string()),
            mined_at: None,
            proof: None,
            milliseconds: None,
        };
        assert_eq!(block.short_hash(), "0000ab12cd34...");

        block.hash = Some("0000ab12cd34".to_string());
        assert_eq!(block.short_hash(), "0000ab12cd34");

        // Byte 12 falls inside a multibyte char; the full string is shown
        // instead of panicking on the slice.
        block.hash = Some("0000ab12cd3é4f56".to_string());
        assert_eq!(block.short_hash(), "0000ab12cd3é4f56");
    }

    #[test]
    fn validation_report_maps_wire_id_to_block_id() {
        let json = r#"{"isValid": false, "errors": [{"id": 3, "error": "hash mismatch"}]}"#;
        let report: ValidationReport = serde_json::from_str(json).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].block_id, 3);
        assert_eq!(report.errors[0].error, "hash mismatch");
    }

    #[test]
    fn upload_request_serializes_camel_case() {
        let req = UploadRequest {
            owner_id: "42".to_string(),
            file_type: "text/plain.txt".to_string(),
            size: 5,
            base64_content: "aGVsbG8=".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["ownerId"], "42");
        assert_eq!(value["fileType"], "text/plain.txt");
        assert_eq!(value["base64Content"], "aGVsbG8=");
    }
}
