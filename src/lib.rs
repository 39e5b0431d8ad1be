//! DocVault TUI: terminal client for the DocVault document-custody chain.
//!
//! Uploaded files accumulate on the backend as *pending* documents. Once
//! enough of them exist, a batch is sealed into a block and the block is
//! mined (proof-of-work) server-side. This client drives that lifecycle:
//! it lists documents and blocks, uploads and downloads payloads, gates
//! block assembly on the configured batch threshold, runs the mining
//! workflow, and renders chain-validation results.
//!
//! All hard work happens on the backend; the client is an orchestrator
//! with the same access level as any other API consumer.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  DOCVAULT-TUI                                                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  [1] Documents   [2] Blocks   [3] Config   [4] Audit         │
//! │                                                              │
//! │   Id  Type  Created              Size     Status   Sel       │
//! │   17  pdf   2026-08-12 10:41:02  12.4 KB  pending  [x]       │
//! │   18  docx  2026-08-12 10:44:51   8.1 KB  block #3           │
//! │  ...                                                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  pending 4/5 · [space] select [d]ownload [x] delete [m]ine   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod auth;
pub mod domain;
pub mod transfer;
pub mod ui;

pub use api::{ApiClient, ApiError};
pub use auth::Identity;
pub use domain::{App, Tab};
