//! Application model: tabs, key dispatch, refresh and action wiring.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{error, warn};

use super::mining::{
    can_assemble, first_unmined, MiningJob, MiningOrchestrator, MiningOutcome, MiningState,
};
use super::selection::{Scope, SelectionSet};
use super::store::DocumentStore;
use super::validator::ChainValidation;
use super::{ActionError, PolicyError};
use crate::api::{ApiClient, ApiError, AuditLog, Block, SystemConfig};
use crate::auth::Identity;
use crate::transfer;

/// Active tab/view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Documents,
    Blocks,
    Config,
    Audit,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Documents => "Documents",
            Tab::Blocks => "Blocks",
            Tab::Config => "Config",
            Tab::Audit => "Audit",
        }
    }
}

/// Text-entry state. `UploadPath` is a plain path prompt; there is no
/// file picker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    UploadPath(String),
    ConfirmClearAudit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line status message shown under the active view.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

/// Deferred work produced by key handling; the event loop runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    DownloadSelected,
    DeleteSelected,
    Upload(PathBuf),
    ValidateChain,
    AssembleAndMine,
    MineNext,
    ClearAuditLogs,
}

pub struct App {
    api: ApiClient,
    pub identity: Identity,
    pub active_tab: Tab,
    pub store: DocumentStore,
    pub selection: SelectionSet,
    pub config: Option<SystemConfig>,
    pub blocks: Vec<Block>,
    pub validation: ChainValidation,
    pub miner: MiningOrchestrator,
    pub audit_logs: Vec<AuditLog>,
    pub docs_cursor: usize,
    pub blocks_cursor: usize,
    pub input: InputMode,
    pub status: Option<StatusLine>,
    pub should_quit: bool,
    download_dir: PathBuf,
    mining_tx: mpsc::Sender<MiningOutcome>,
}

impl App {
    pub fn new(
        api: ApiClient,
        identity: Identity,
        download_dir: PathBuf,
        mining_tx: mpsc::Sender<MiningOutcome>,
    ) -> Self {
        Self {
            api,
            identity,
            active_tab: Tab::Documents,
            store: DocumentStore::new(),
            selection: SelectionSet::new(),
            config: None,
            blocks: Vec::new(),
            validation: ChainValidation::new(),
            miner: MiningOrchestrator::new(),
            audit_logs: Vec::new(),
            docs_cursor: 0,
            blocks_cursor: 0,
            input: InputMode::Normal,
            status: None,
            should_quit: false,
            download_dir,
            mining_tx,
        }
    }

    fn notice(&mut self, message: impl Into<String>) {
        self.status = Some(StatusLine {
            kind: StatusKind::Info,
            message: message.into(),
        });
    }

    /// A 401 means the credential is bad, not the backend; say so
    /// instead of echoing a bare status code.
    fn fail_api(&mut self, context: &str, error: ApiError) {
        if error.is_auth() {
            self.fail(format!("{context}: token rejected; obtain a new one"));
        } else {
            self.fail(format!("{context}: {error}"));
        }
    }

    fn fail(&mut self, message: impl ToString) {
        let message = message.to_string();
        error!(%message, "action failed");
        self.status = Some(StatusLine {
            kind: StatusKind::Error,
            message,
        });
    }

    /// Handle a key press. Pure state changes happen here; anything that
    /// needs the network comes back as an [`Action`].
    pub fn on_key(&mut self, key: crossterm::event::KeyCode) -> Option<Action> {
        use crossterm::event::KeyCode;

        // The mining indicator is non-dismissible; terminal states wait
        // for an acknowledging key.
        if self.miner.in_flight() {
            if key == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return None;
        }
        if self.miner.awaiting_ack() {
            self.acknowledge_mining();
            return None;
        }

        match std::mem::take(&mut self.input) {
            InputMode::UploadPath(mut path) => {
                match key {
                    KeyCode::Enter => {
                        if !path.is_empty() {
                            return Some(Action::Upload(PathBuf::from(path)));
                        }
                    }
                    KeyCode::Esc => {}
                    KeyCode::Backspace => {
                        path.pop();
                        self.input = InputMode::UploadPath(path);
                    }
                    KeyCode::Char(c) => {
                        path.push(c);
                        self.input = InputMode::UploadPath(path);
                    }
                    _ => self.input = InputMode::UploadPath(path),
                }
                return None;
            }
            InputMode::ConfirmClearAudit => {
                if let KeyCode::Char('y') = key {
                    return Some(Action::ClearAuditLogs);
                }
                self.notice("clear cancelled");
                return None;
            }
            InputMode::Normal => {}
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.active_tab = Tab::Documents,
            KeyCode::Char('2') => self.active_tab = Tab::Blocks,
            KeyCode::Char('3') => self.active_tab = Tab::Config,
            KeyCode::Char('4') => self.active_tab = Tab::Audit,
            KeyCode::Char('r') => return Some(Action::Refresh),
            KeyCode::Up | KeyCode::Char('k') => self.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor_down(),
            KeyCode::Char(' ') if self.active_tab == Tab::Documents => self.toggle_cursor_doc(),
            KeyCode::Char('a') if self.active_tab == Tab::Documents => {
                let ids: Vec<u64> = self.store.all().iter().map(|d| d.id).collect();
                self.selection.select_all(Scope::Pending, ids);
            }
            KeyCode::Char('c') if self.active_tab == Tab::Documents => {
                self.selection.clear_all(Scope::Pending);
            }
            KeyCode::Char('d') if self.active_tab == Tab::Documents => {
                return Some(Action::DownloadSelected)
            }
            KeyCode::Char('x') if self.active_tab == Tab::Documents => {
                return Some(Action::DeleteSelected)
            }
            KeyCode::Char('u') if self.active_tab == Tab::Documents => {
                self.input = InputMode::UploadPath(String::new());
            }
            KeyCode::Char('m') if self.active_tab == Tab::Documents => {
                return Some(Action::AssembleAndMine)
            }
            KeyCode::Char('m') if self.active_tab == Tab::Blocks => return Some(Action::MineNext),
            KeyCode::Char('v') if self.active_tab == Tab::Blocks => {
                return Some(Action::ValidateChain)
            }
            KeyCode::Char('C') if self.active_tab == Tab::Audit => {
                self.input = InputMode::ConfirmClearAudit;
            }
            _ => {}
        }
        None
    }

    fn cursor_up(&mut self) {
        match self.active_tab {
            Tab::Documents => self.docs_cursor = self.docs_cursor.saturating_sub(1),
            Tab::Blocks => self.blocks_cursor = self.blocks_cursor.saturating_sub(1),
            _ => {}
        }
    }

    fn cursor_down(&mut self) {
        match self.active_tab {
            Tab::Documents => {
                let max = self.store.all().len().saturating_sub(1);
                self.docs_cursor = (self.docs_cursor + 1).min(max);
            }
            Tab::Blocks => {
                let max = self.blocks.len().saturating_sub(1);
                self.blocks_cursor = (self.blocks_cursor + 1).min(max);
            }
            _ => {}
        }
    }

    fn toggle_cursor_doc(&mut self) {
        if let Some(doc) = self.store.all().get(self.docs_cursor) {
            self.selection.toggle(Scope::Pending, doc.id);
        }
    }

    /// Run a deferred action. Short operations are awaited inline; mining
    /// is spawned so the interface keeps drawing its progress state.
    pub async fn run_action(&mut self, action: Action) {
        match action {
            Action::Refresh => self.refresh_active_tab().await,
            Action::DownloadSelected => self.download_selected().await,
            Action::DeleteSelected => self.delete_selected().await,
            Action::Upload(path) => self.upload(&path).await,
            Action::ValidateChain => self.validate_chain().await,
            Action::AssembleAndMine => self.start_assemble_and_mine(),
            Action::MineNext => self.start_mine_next(),
            Action::ClearAuditLogs => self.clear_audit_logs().await,
        }
    }

    /// Initial data fetch for the current tab, skipped when the tab's
    /// data is already present.
    pub async fn mount_active_tab(&mut self) {
        let needs = match self.active_tab {
            Tab::Documents => self.store.all().is_empty(),
            Tab::Blocks => self.blocks.is_empty(),
            Tab::Config => self.config.is_none(),
            Tab::Audit => self.audit_logs.is_empty(),
        };
        if needs {
            self.refresh_active_tab().await;
        }
    }

    pub async fn refresh_active_tab(&mut self) {
        match self.active_tab {
            Tab::Documents => self.refresh_documents().await,
            Tab::Blocks => self.refresh_blocks().await,
            Tab::Config => self.refresh_config().await,
            Tab::Audit => self.refresh_audit().await,
        }
    }

    /// Reload the document cache and the batch configuration. A failed
    /// load keeps the previous cache; a successful one resets selection,
    /// which would otherwise index into a stale list.
    pub async fn refresh_documents(&mut self) {
        if !self.identity.is_authenticated() {
            self.fail(PolicyError::NotAuthenticated);
            return;
        }
        match self.store.load(&self.api, &self.identity).await {
            Ok(()) => {
                self.selection.reset();
                self.docs_cursor = self
                    .docs_cursor
                    .min(self.store.all().len().saturating_sub(1));
                self.status = None;
            }
            Err(e) => self.fail_api("loading documents", e),
        }
        self.refresh_config().await;
    }

    /// Reload the block list and re-run chain validation (the validator
    /// runs on view mount and on demand).
    pub async fn refresh_blocks(&mut self) {
        match self.api.blocks().await {
            Ok(blocks) => {
                self.blocks = blocks;
                self.blocks_cursor = self.blocks_cursor.min(self.blocks.len().saturating_sub(1));
                self.status = None;
            }
            Err(e) => self.fail_api("loading blocks", e),
        }
        self.validate_chain().await;
        if self.config.is_none() {
            self.refresh_config().await;
        }
    }

    async fn refresh_config(&mut self) {
        match self.api.system_config().await {
            Ok(config) => self.config = Some(config),
            Err(e) => {
                // The previous config (if any) stays usable.
                warn!(error = %e, "loading system config failed");
                if self.config.is_none() {
                    self.fail_api("loading config", e);
                }
            }
        }
    }

    async fn refresh_audit(&mut self) {
        match self.api.audit_logs().await {
            Ok(logs) => {
                self.audit_logs = logs;
                self.status = None;
            }
            Err(e) => self.fail_api("loading audit logs", e),
        }
    }

    /// On a transport failure the previous validation result is retained;
    /// a failed check is not evidence the chain became valid.
    pub async fn validate_chain(&mut self) {
        match self.api.validate_chain().await {
            Ok(report) => self.validation.apply(report),
            Err(e) => self.fail_api("chain validation", e),
        }
    }

    /// Download the selection: one id fetches the single payload, several
    /// fetch one backend-built archive. Sealed documents are downloadable.
    async fn download_selected(&mut self) {
        let mut ids = self.selection.selected(Scope::Pending);
        if ids.is_empty() {
            // Fall back to the document under the cursor.
            if let Some(doc) = self.store.all().get(self.docs_cursor) {
                ids.push(doc.id);
            }
        }
        let result = match ids.as_slice() {
            [] => {
                self.fail(PolicyError::EmptySelection);
                return;
            }
            [id] => match self.api.download(*id).await {
                Ok(payload) => transfer::save_document(&self.download_dir, *id, &payload)
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            },
            many => match self.api.download_zip(many).await {
                Ok(bytes) => {
                    transfer::save_archive(&self.download_dir, &bytes).map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            },
        };
        match result {
            Ok(path) => self.notice(format!("saved {}", path.display())),
            Err(e) => self.fail(format!("download: {e}")),
        }
    }

    /// Bulk delete the pending subset of the selection. Sealed ids stay
    /// untouched; a selection with no pending ids is refused outright.
    async fn delete_selected(&mut self) {
        let selected = self.selection.selected(Scope::Pending);
        if selected.is_empty() {
            self.fail(PolicyError::EmptySelection);
            return;
        }
        let pending = self.store.pending_subset(&selected);
        if pending.is_empty() {
            self.fail(PolicyError::SealedDocuments);
            return;
        }
        match self.store.remove_many(&self.api, &pending).await {
            Ok(()) => {
                self.selection.clear_all(Scope::Pending);
                self.docs_cursor = self
                    .docs_cursor
                    .min(self.store.all().len().saturating_sub(1));
                self.notice(format!("deleted {} document(s)", pending.len()));
            }
            Err(ActionError::Api(e)) => self.fail_api("delete", e),
            Err(e) => self.fail(format!("delete: {e}")),
        }
    }

    /// Upload a local file. An unrecognized file type is refused before
    /// any network call; on success the list is refetched rather than
    /// patched locally.
    async fn upload(&mut self, path: &std::path::Path) {
        if !self.identity.is_authenticated() {
            self.fail(PolicyError::NotAuthenticated);
            return;
        }
        let request = match transfer::build_upload(path, &self.identity) {
            Ok(request) => request,
            Err(e) => {
                self.fail(format!("upload: {e}"));
                return;
            }
        };
        match self.api.upload(&request).await {
            Ok(()) => {
                self.notice(format!("uploaded {}", path.display()));
                self.refresh_documents().await;
            }
            Err(e) => self.fail_api("upload", e),
        }
    }

    /// Gate, then kick off the combined assemble-and-mine request in the
    /// background. The orchestrator refuses re-entry while in flight.
    fn start_assemble_and_mine(&mut self) {
        let Some(config) = self.config else {
            self.fail("system config not loaded; press r to retry");
            return;
        };
        let pending = self.store.pending_count();
        if !can_assemble(pending, config.max_docs) {
            let missing = config.max_docs as usize - pending;
            self.fail(PolicyError::BelowThreshold { missing });
            return;
        }
        if let Err(e) = self.miner.begin(MiningJob::AssembleAndMine) {
            self.fail(e);
            return;
        }
        let api = self.api.clone();
        let tx = self.mining_tx.clone();
        tokio::spawn(async move {
            let job = MiningJob::AssembleAndMine;
            let outcome = match api.create_and_mine(config.max_docs, config.quantity_of_zeros).await
            {
                Ok(()) => MiningOutcome::Success(job),
                Err(e) => MiningOutcome::Failed(job, e.to_string()),
            };
            let _ = tx.send(outcome).await;
        });
    }

    /// Mine the first unmined block in creation order; no other block is
    /// ever offered.
    fn start_mine_next(&mut self) {
        let Some(config) = self.config else {
            self.fail("system config not loaded; press r to retry");
            return;
        };
        let Some(block_id) = first_unmined(&self.blocks).map(|b| b.id) else {
            self.fail(PolicyError::NoUnminedBlock);
            return;
        };
        if let Err(e) = self.miner.begin(MiningJob::MineBlock(block_id)) {
            self.fail(e);
            return;
        }
        let api = self.api.clone();
        let tx = self.mining_tx.clone();
        tokio::spawn(async move {
            let job = MiningJob::MineBlock(block_id);
            let outcome = match api.mine_block(block_id, config.quantity_of_zeros).await {
                Ok(()) => MiningOutcome::Success(job),
                Err(e) => MiningOutcome::Failed(job, e.to_string()),
            };
            let _ = tx.send(outcome).await;
        });
    }

    /// Fold a finished mining request back into local state. A combined
    /// assemble-and-mine invalidates both lists wholesale: the backend is
    /// the sole source of truth for block membership and hash linkage.
    pub async fn on_mining_outcome(&mut self, outcome: MiningOutcome) {
        self.miner.complete(outcome);
        let succeeded = match self.miner.state() {
            MiningState::Success(job) => Some(*job),
            _ => None,
        };
        if let Some(job) = succeeded {
            match job {
                MiningJob::AssembleAndMine => {
                    self.refresh_documents().await;
                    self.refresh_blocks().await;
                }
                MiningJob::MineBlock(id) => {
                    if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
                        block.is_mined = true;
                    }
                }
            }
        }
    }

    fn acknowledge_mining(&mut self) {
        let state = self.miner.state().clone();
        match state {
            MiningState::Success(_) => self.notice("mining completed"),
            MiningState::Failed(_, error) => self.fail(format!("mining: {error}")),
            _ => {}
        }
        self.miner.acknowledge();
    }

    /// Clear the backend audit trail; the local list follows only after
    /// the backend confirms.
    async fn clear_audit_logs(&mut self) {
        match self.api.clear_audit_logs().await {
            Ok(()) => {
                self.audit_logs.clear();
                self.notice("audit logs cleared");
            }
            Err(e) => self.fail_api("clearing audit logs", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyCode;

    use super::*;
    use crate::api::Document;

    fn test_app(server_url: &str) -> (App, mpsc::Receiver<MiningOutcome>) {
        let api = ApiClient::new(server_url, Some("tok".to_string()), Duration::from_secs(5))
            .unwrap();
        let identity = Identity {
            user_id: "42".to_string(),
            user_name: "alice".to_string(),
        };
        let (tx, rx) = mpsc::channel(8);
        (
            App::new(api, identity, std::env::temp_dir(), tx),
            rx,
        )
    }

    fn doc(id: u64, block_id: Option<u64>) -> Document {
        Document {
            id,
            owner_id: "42".to_string(),
            file_type: "text/plain.txt".to_string(),
            size: 10,
            created_at: chrono::Utc::now(),
            base64_content: None,
            block_id,
        }
    }

    fn block(id: u64, is_mined: bool) -> Block {
        Block {
            id,
            created_at: chrono::Utc::now(),
            documents: Vec::new(),
            is_mined,
            previous_hash: None,
            hash: None,
            mined_at: None,
            proof: None,
            milliseconds: None,
        }
    }

    #[tokio::test]
    async fn below_threshold_refuses_without_network_call() {
        // No mock server routes at all: a network attempt would surface
        // as a connection error, not the threshold message.
        let server = mockito::Server::new_async().await;
        let (mut app, _rx) = test_app(&server.url());
        app.config = Some(SystemConfig {
            max_docs: 5,
            process_time: 10,
            quantity_of_zeros: 4,
        });

        app.run_action(Action::AssembleAndMine).await;

        let status = app.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("5 more pending"));
        assert!(!app.miner.in_flight());
    }

    #[tokio::test]
    async fn assemble_succeeds_and_reloads_both_lists() {
        let mut server = mockito::Server::new_async().await;
        let mine_mock = server
            .mock("POST", "/blocks/create-and-mine/1/4")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        server
            .mock("GET", "/documents/42")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        server
            .mock("GET", "/blocks/all")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        server
            .mock("GET", "/blocks/validate-chain")
            .with_status(200)
            .with_body(r#"{"isValid": true, "errors": []}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/systemconfig/get")
            .with_status(200)
            .with_body(r#"{"maxDocs":1,"processTime":10,"quantityOfZeros":4}"#)
            .create_async()
            .await;

        let (mut app, mut rx) = test_app(&server.url());
        app.store = DocumentStore::seed(vec![doc(1, None)]);
        app.config = Some(SystemConfig {
            max_docs: 1,
            process_time: 10,
            quantity_of_zeros: 4,
        });

        app.run_action(Action::AssembleAndMine).await;
        assert!(app.miner.in_flight());

        // Second invocation while in flight is ignored at the key layer.
        assert!(app.on_key(KeyCode::Char('m')).is_none());

        let outcome = rx.recv().await.unwrap();
        app.on_mining_outcome(outcome).await;
        mine_mock.assert_async().await;
        assert!(matches!(
            app.miner.state(),
            MiningState::Success(MiningJob::AssembleAndMine)
        ));
        // After the full reload no pending documents remain.
        assert_eq!(app.store.pending_count(), 0);
    }

    #[tokio::test]
    async fn mine_next_targets_first_unmined_block_and_flips_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/blocks/mine/2/4")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let (mut app, mut rx) = test_app(&server.url());
        app.config = Some(SystemConfig {
            max_docs: 5,
            process_time: 10,
            quantity_of_zeros: 4,
        });
        app.blocks = vec![block(1, true), block(2, false), block(3, false)];

        app.run_action(Action::MineNext).await;
        let outcome = rx.recv().await.unwrap();
        app.on_mining_outcome(outcome).await;

        mock.assert_async().await;
        assert!(app.blocks[1].is_mined);
        assert!(!app.blocks[2].is_mined);
    }

    #[tokio::test]
    async fn mine_next_with_all_blocks_mined_is_refused() {
        let server = mockito::Server::new_async().await;
        let (mut app, _rx) = test_app(&server.url());
        app.config = Some(SystemConfig {
            max_docs: 5,
            process_time: 10,
            quantity_of_zeros: 4,
        });
        app.blocks = vec![block(1, true)];

        app.run_action(Action::MineNext).await;
        let status = app.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("no unmined block"));
    }

    #[tokio::test]
    async fn failed_validation_keeps_previous_errors() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/blocks/validate-chain")
            .with_status(200)
            .with_body(r#"{"isValid": false, "errors": [{"id": 3, "error": "hash mismatch"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let (mut app, _rx) = test_app(&server.url());
        app.run_action(Action::ValidateChain).await;
        ok.assert_async().await;
        assert_eq!(app.validation.error_for(3), Some("hash mismatch"));

        // Re-check fails at transport level; the stale list survives.
        server
            .mock("GET", "/blocks/validate-chain")
            .with_status(500)
            .create_async()
            .await;
        app.run_action(Action::ValidateChain).await;
        assert_eq!(app.validation.error_for(3), Some("hash mismatch"));
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn rejected_token_gets_a_distinct_status_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/documents/42")
            .with_status(401)
            .create_async()
            .await;

        let (mut app, _rx) = test_app(&server.url());
        // Config already loaded; its refresh failing only warns.
        app.config = Some(SystemConfig {
            max_docs: 5,
            process_time: 10,
            quantity_of_zeros: 4,
        });

        app.run_action(Action::Refresh).await;

        let status = app.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("token rejected"));
    }

    #[tokio::test]
    async fn upload_of_unsupported_type_makes_zero_network_calls() {
        let server = mockito::Server::new_async().await;
        let (mut app, _rx) = test_app(&server.url());

        app.run_action(Action::Upload(PathBuf::from("payload.exe"))).await;

        let status = app.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("unsupported file type"));
    }

    #[tokio::test]
    async fn upload_path_prompt_collects_characters() {
        let server = mockito::Server::new_async().await;
        let (mut app, _rx) = test_app(&server.url());

        assert!(app.on_key(KeyCode::Char('u')).is_none());
        for c in "a.txt".chars() {
            assert!(app.on_key(KeyCode::Char(c)).is_none());
        }
        let action = app.on_key(KeyCode::Enter).unwrap();
        assert_eq!(action, Action::Upload(PathBuf::from("a.txt")));
        assert_eq!(app.input, InputMode::Normal);
    }

    #[tokio::test]
    async fn delete_with_only_sealed_selection_is_refused() {
        // No routes mocked: the refusal must happen before any request.
        let server = mockito::Server::new_async().await;
        let (mut app, _rx) = test_app(&server.url());
        app.store = DocumentStore::seed(vec![doc(2, Some(9)), doc(4, Some(9))]);
        app.selection.select_all(Scope::Pending, [2, 4]);

        app.run_action(Action::DeleteSelected).await;
        let status = app.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("sealed"));
        assert_eq!(app.store.all().len(), 2);
    }
}
