//! In-memory cache of the caller's documents.
//!
//! The backend is the sole source of truth. The cache is replaced
//! wholesale on a successful load and mutated locally only after the
//! backend has confirmed a delete; it is never updated optimistically.

use tracing::debug;

use super::{ActionError, PolicyError};
use crate::api::{ApiClient, ApiError, Document};
use crate::auth::Identity;

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn seed(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Replace the cache from `GET /documents/{userId}`. On failure the
    /// previous cache stays intact; there is no partial overwrite.
    pub async fn load(&mut self, api: &ApiClient, identity: &Identity) -> Result<(), ApiError> {
        let documents = api.documents(&identity.user_id).await?;
        debug!(count = documents.len(), "document cache reloaded");
        self.documents = documents;
        Ok(())
    }

    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: u64) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn is_pending(&self, id: u64) -> bool {
        self.get(id).is_some_and(Document::is_pending)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.is_pending())
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    /// Restrict a candidate id list to documents that are pending in the
    /// cache. Destructive bulk actions go through this before any call.
    pub fn pending_subset(&self, ids: &[u64]) -> Vec<u64> {
        ids.iter().copied().filter(|id| self.is_pending(*id)).collect()
    }

    /// Delete one pending document. Sealed documents are refused before
    /// any request is made; local removal happens only after the backend
    /// confirms.
    pub async fn remove(&mut self, api: &ApiClient, id: u64) -> Result<(), ActionError> {
        if !self.is_pending(id) {
            return Err(PolicyError::SealedDocuments.into());
        }
        api.delete_document(id).await?;
        self.documents.retain(|d| d.id != id);
        Ok(())
    }

    /// Bulk delete. The caller filters to pending ids first; a sealed id
    /// slipping through is still refused here, client-side.
    pub async fn remove_many(&mut self, api: &ApiClient, ids: &[u64]) -> Result<(), ActionError> {
        if ids.is_empty() {
            return Err(PolicyError::EmptySelection.into());
        }
        if ids.iter().any(|id| !self.is_pending(*id)) {
            return Err(PolicyError::SealedDocuments.into());
        }
        if let [id] = ids {
            api.delete_document(*id).await?;
        } else {
            api.delete_documents(ids).await?;
        }
        self.documents.retain(|d| !ids.contains(&d.id));
        Ok(())
    }
}
