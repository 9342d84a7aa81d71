use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use folio_db::EntityId;
use folio_http::error::AppError;
use folio_http::validate::FieldError;

use super::models::{BookCreateDto, BookDto, BookUpdateDto};
use super::repository::BookRepository;
use crate::modules::authors::repository::AuthorRepository;

#[derive(Clone)]
pub struct BooksState {
    pub books: Arc<dyn BookRepository>,
    pub authors: Arc<dyn AuthorRepository>,
}

/// GET / — list every book.
pub async fn list_books(State(state): State<BooksState>) -> Result<Json<Vec<BookDto>>, AppError> {
    let books = state.books.find_all().await?;
    Ok(Json(books.into_iter().map(BookDto::from).collect()))
}

/// GET /{id} — fetch one book.
pub async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<EntityId>,
) -> Result<Json<BookDto>, AppError> {
    let book = state
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("no book with id {id}")))?;
    Ok(Json(book.into()))
}

/// POST / — create a book after confirming the referenced author exists.
pub async fn create_book(
    State(state): State<BooksState>,
    Json(dto): Json<BookCreateDto>,
) -> Result<(StatusCode, Json<BookDto>), AppError> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors, "book payload failed validation"));
    }

    // A missing author is a caller input error (400), not a lookup miss.
    // The book store must not be touched in that case.
    if !state.authors.exists(dto.author_id).await? {
        return Err(AppError::validation(
            vec![FieldError::new("author_id", "author does not exist")],
            "book payload failed validation",
        ));
    }

    let created = state
        .books
        .create(dto.into_record())
        .await?
        .ok_or_else(|| AppError::persistence("book record was not persisted"))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /{id} — full-record replace.
pub async fn update_book(
    State(state): State<BooksState>,
    Path(id): Path<EntityId>,
    Json(dto): Json<BookUpdateDto>,
) -> Result<StatusCode, AppError> {
    if id < 1 {
        return Err(AppError::bad_request("id must be a positive id"));
    }
    if dto.id != id {
        return Err(AppError::bad_request("path id does not match body id"));
    }
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors, "book payload failed validation"));
    }

    if !state.books.exists(id).await? {
        return Err(AppError::not_found(format!("no book with id {id}")));
    }

    // No transaction spans the existence check and the write; a concurrent
    // delete can land in the gap, in which case the write reports failure.
    if !state.books.update(dto.into_record()).await? {
        return Err(AppError::persistence("book record was not updated"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /{id} — load, then delete.
pub async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, AppError> {
    if id < 1 {
        return Err(AppError::bad_request("id must be a positive id"));
    }

    if !state.books.exists(id).await? {
        return Err(AppError::not_found(format!("no book with id {id}")));
    }

    // Same check/use gap as update.
    let book = state
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("no book with id {id}")))?;

    if !state.books.delete(book).await? {
        return Err(AppError::persistence("book record was not deleted"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::super::BooksModule;
    use super::*;
    use crate::modules::authors::models::Author;
    use crate::modules::authors::repository::{AuthorRepository, MemAuthorRepository};
    use crate::modules::books::models::Book;
    use crate::modules::books::repository::MemBookRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use folio_db::StoreResult;
    use folio_kernel::Module;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Book store double that counts write attempts.
    #[derive(Default)]
    struct CountingBookRepository {
        inner: MemBookRepository,
        creates: AtomicUsize,
    }

    #[async_trait]
    impl BookRepository for CountingBookRepository {
        async fn find_all(&self) -> StoreResult<Vec<Book>> {
            self.inner.find_all().await
        }

        async fn find_by_id(&self, id: i64) -> StoreResult<Option<Book>> {
            self.inner.find_by_id(id).await
        }

        async fn exists(&self, id: i64) -> StoreResult<bool> {
            self.inner.exists(id).await
        }

        async fn create(&self, record: Book) -> StoreResult<Option<Book>> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.inner.create(record).await
        }

        async fn update(&self, record: Book) -> StoreResult<bool> {
            self.inner.update(record).await
        }

        async fn delete(&self, record: Book) -> StoreResult<bool> {
            self.inner.delete(record).await
        }
    }

    async fn seeded_author(repo: &MemAuthorRepository) -> Author {
        repo.create(Author {
            id: 0,
            first_name: "Ursula".into(),
            last_name: "Le Guin".into(),
        })
        .await
        .unwrap()
        .unwrap()
    }

    fn send_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn book_routes_are_open_to_anonymous_callers() {
        let module = BooksModule::new(
            Arc::new(MemBookRepository::new()),
            Arc::new(MemAuthorRepository::new()),
        );

        let response = module
            .routes()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_with_unknown_author_is_rejected_before_persistence() {
        let counting = Arc::new(CountingBookRepository::default());
        let module = BooksModule::new(counting.clone(), Arc::new(MemAuthorRepository::new()));

        let response = module
            .routes()
            .oneshot(send_json(
                "POST",
                "/",
                serde_json::json!({
                    "title": "Orphaned",
                    "isbn": "978-0000000000",
                    "author_id": 123
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["details"][0]["field"], "author_id");
        assert_eq!(counting.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_with_known_author_round_trips() {
        let authors = Arc::new(MemAuthorRepository::new());
        let author = seeded_author(&authors).await;
        let module = BooksModule::new(Arc::new(MemBookRepository::new()), authors);

        let response = module
            .routes()
            .oneshot(send_json(
                "POST",
                "/",
                serde_json::json!({
                    "title": "The Dispossessed",
                    "year": 1974,
                    "isbn": "978-0060512750",
                    "author_id": author.id
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["id"], 1);

        let response = module
            .routes()
            .oneshot(Request::builder().uri("/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = json_body(response).await;
        assert_eq!(fetched["title"], "The Dispossessed");
        assert_eq!(fetched["year"], 1974);
        assert_eq!(fetched["author_id"], author.id);
    }

    #[tokio::test]
    async fn update_with_mismatched_ids_is_rejected_regardless_of_store_state() {
        let module = BooksModule::new(
            Arc::new(MemBookRepository::new()),
            Arc::new(MemAuthorRepository::new()),
        );

        let response = module
            .routes()
            .oneshot(send_json(
                "PUT",
                "/5",
                serde_json::json!({
                    "id": 6,
                    "title": "Mismatch",
                    "isbn": "978-0000000000",
                    "author_id": 1
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn operations_on_absent_books_are_not_found() {
        let module = BooksModule::new(
            Arc::new(MemBookRepository::new()),
            Arc::new(MemAuthorRepository::new()),
        );

        let get = module
            .routes()
            .oneshot(Request::builder().uri("/999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(get.status(), StatusCode::NOT_FOUND);

        let update = module
            .routes()
            .oneshot(send_json(
                "PUT",
                "/999",
                serde_json::json!({
                    "id": 999,
                    "title": "Nowhere",
                    "isbn": "978-0000000000",
                    "author_id": 1
                }),
            ))
            .await
            .unwrap();
        assert_eq!(update.status(), StatusCode::NOT_FOUND);

        let delete = module
            .routes()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_with_non_positive_id_is_bad_request() {
        let module = BooksModule::new(
            Arc::new(MemBookRepository::new()),
            Arc::new(MemAuthorRepository::new()),
        );

        let response = module
            .routes()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
