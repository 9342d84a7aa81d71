use async_trait::async_trait;

use folio_db::{EntityId, MemTable, StoreResult};

use super::models::Book;

/// Entity store contract for book records. Same write semantics as the
/// author store: refusal is a return value, `StoreError` is a backend fault.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Book>>;
    async fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Book>>;
    async fn exists(&self, id: EntityId) -> StoreResult<bool>;
    async fn create(&self, record: Book) -> StoreResult<Option<Book>>;
    async fn update(&self, record: Book) -> StoreResult<bool>;
    async fn delete(&self, record: Book) -> StoreResult<bool>;
}

/// In-memory book store backing local deployments and tests.
#[derive(Default)]
pub struct MemBookRepository {
    table: MemTable<Book>,
}

impl MemBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemBookRepository {
    async fn find_all(&self) -> StoreResult<Vec<Book>> {
        Ok(self.table.find_all().await)
    }

    async fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Book>> {
        Ok(self.table.find_by_id(id).await)
    }

    async fn exists(&self, id: EntityId) -> StoreResult<bool> {
        Ok(self.table.exists(id).await)
    }

    async fn create(&self, record: Book) -> StoreResult<Option<Book>> {
        let stored = self
            .table
            .insert_with(move |id| Book { id, ..record })
            .await;
        Ok(Some(stored))
    }

    async fn update(&self, record: Book) -> StoreResult<bool> {
        Ok(self.table.replace(record.id, record).await)
    }

    async fn delete(&self, record: Book) -> StoreResult<bool> {
        Ok(self.table.remove(record.id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, author_id: EntityId) -> Book {
        Book {
            id: 0,
            title: title.into(),
            year: None,
            isbn: "978-0000000000".into(),
            summary: None,
            image: None,
            author_id,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_keeps_author_reference() {
        let repo = MemBookRepository::new();

        let created = repo
            .create(record("Parable of the Sower", 4))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.author_id, 4);
    }

    #[tokio::test]
    async fn update_and_delete_report_absence_as_false() {
        let repo = MemBookRepository::new();
        let ghost = Book {
            id: 9,
            ..record("Ghost", 1)
        };

        assert!(!repo.update(ghost.clone()).await.unwrap());
        assert!(!repo.delete(ghost).await.unwrap());
    }
}
