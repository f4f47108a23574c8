//! In-process document store.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mantra_core::Document;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::TRACING_TARGET;
use crate::error::StoreResult;
use crate::filter::{DocumentFilter, SortOrder};
use crate::store::{DocumentStore, ModifyFn, NewDocument};

/// In-process [`DocumentStore`] backed by an async `RwLock`.
///
/// `modify` runs its closure while holding the write guard, which makes
/// rating upsert-and-recompute one logical transaction per document.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Uuid, Document>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, new_document: NewDocument) -> StoreResult<Document> {
        let document = Document {
            id: Uuid::now_v7(),
            title: new_document.title,
            description: new_document.description,
            kind: new_document.kind,
            subject: new_document.subject,
            course: new_document.course,
            college: new_document.college,
            semester: new_document.semester,
            year: new_document.year,
            session: new_document.session,
            file_url: new_document.file_url,
            file_ref: new_document.file_ref,
            contributor: new_document.contributor,
            ratings: Default::default(),
            ratings_count: 0,
            avg_rating: 0.0,
            created_at: Timestamp::now(),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            document_id = %document.id,
            "document inserted"
        );

        self.documents
            .write()
            .await
            .insert(document.id, document.clone());

        Ok(document)
    }

    async fn find(&self, filter: &DocumentFilter, sort: SortOrder) -> StoreResult<Vec<Document>> {
        let documents = self.documents.read().await;

        let mut matched: Vec<Document> = documents
            .values()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect();

        // The id is a v7 uuid, so it breaks ties within one timestamp in
        // insertion order.
        match sort {
            SortOrder::CreatedAtDesc => {
                matched.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            }
            SortOrder::CreatedAtAsc => {
                matched.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
            }
        }

        Ok(matched)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Document>> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn modify(&self, id: Uuid, apply: ModifyFn) -> StoreResult<Option<Document>> {
        let mut documents = self.documents.write().await;

        let Some(document) = documents.get_mut(&id) else {
            return Ok(None);
        };

        apply(document);
        Ok(Some(document.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let removed = self.documents.write().await.remove(&id).is_some();

        if removed {
            tracing::debug!(
                target: TRACING_TARGET,
                document_id = %id,
                "document removed"
            );
        }

        Ok(removed)
    }
}
