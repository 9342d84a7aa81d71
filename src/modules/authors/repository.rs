use async_trait::async_trait;

use folio_db::{EntityId, MemTable, StoreResult};

use super::models::Author;

/// Entity store contract for author records.
///
/// Writes report refusal through their return value (`None`/`false`) rather
/// than an error; `StoreError` is reserved for backend faults. `delete` takes
/// the previously loaded record, matching the load-then-delete call shape of
/// the handlers.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Author>>;
    async fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Author>>;
    async fn exists(&self, id: EntityId) -> StoreResult<bool>;
    async fn create(&self, record: Author) -> StoreResult<Option<Author>>;
    async fn update(&self, record: Author) -> StoreResult<bool>;
    async fn delete(&self, record: Author) -> StoreResult<bool>;
}

/// In-memory author store backing local deployments and tests.
#[derive(Default)]
pub struct MemAuthorRepository {
    table: MemTable<Author>,
}

impl MemAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepository for MemAuthorRepository {
    async fn find_all(&self) -> StoreResult<Vec<Author>> {
        Ok(self.table.find_all().await)
    }

    async fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Author>> {
        Ok(self.table.find_by_id(id).await)
    }

    async fn exists(&self, id: EntityId) -> StoreResult<bool> {
        Ok(self.table.exists(id).await)
    }

    async fn create(&self, record: Author) -> StoreResult<Option<Author>> {
        let stored = self
            .table
            .insert_with(move |id| Author { id, ..record })
            .await;
        Ok(Some(stored))
    }

    async fn update(&self, record: Author) -> StoreResult<bool> {
        Ok(self.table.replace(record.id, record).await)
    }

    async fn delete(&self, record: Author) -> StoreResult<bool> {
        Ok(self.table.remove(record.id).await)
    }
}
