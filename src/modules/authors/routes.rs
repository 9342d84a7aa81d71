use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use folio_db::EntityId;
use folio_http::error::AppError;

use super::models::{AuthorCreateDto, AuthorDto, AuthorUpdateDto};
use super::repository::AuthorRepository;

#[derive(Clone)]
pub struct AuthorsState {
    pub repo: Arc<dyn AuthorRepository>,
}

/// GET / — list every author.
pub async fn list_authors(
    State(state): State<AuthorsState>,
) -> Result<Json<Vec<AuthorDto>>, AppError> {
    let authors = state.repo.find_all().await?;
    Ok(Json(authors.into_iter().map(AuthorDto::from).collect()))
}

/// GET /{id} — fetch one author.
pub async fn get_author(
    State(state): State<AuthorsState>,
    Path(id): Path<EntityId>,
) -> Result<Json<AuthorDto>, AppError> {
    let author = state
        .repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("no author with id {id}")))?;
    Ok(Json(author.into()))
}

/// POST / — create an author, returning the stored record with its id.
pub async fn create_author(
    State(state): State<AuthorsState>,
    Json(dto): Json<AuthorCreateDto>,
) -> Result<(StatusCode, Json<AuthorDto>), AppError> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors, "author payload failed validation"));
    }

    let created = state
        .repo
        .create(dto.into_record())
        .await?
        .ok_or_else(|| AppError::persistence("author record was not persisted"))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /{id} — full-record replace.
pub async fn update_author(
    State(state): State<AuthorsState>,
    Path(id): Path<EntityId>,
    Json(dto): Json<AuthorUpdateDto>,
) -> Result<StatusCode, AppError> {
    if id < 1 {
        return Err(AppError::bad_request("id must be a positive id"));
    }
    if dto.id != id {
        return Err(AppError::bad_request("path id does not match body id"));
    }
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors, "author payload failed validation"));
    }

    if !state.repo.exists(id).await? {
        return Err(AppError::not_found(format!("no author with id {id}")));
    }

    // The existence check and the write are separate store calls with no
    // transaction between them; a concurrent delete can land in the gap, in
    // which case the write reports failure.
    if !state.repo.update(dto.into_record()).await? {
        return Err(AppError::persistence("author record was not updated"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /{id} — load, then delete.
pub async fn delete_author(
    State(state): State<AuthorsState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, AppError> {
    if id < 1 {
        return Err(AppError::bad_request("id must be a positive id"));
    }

    if !state.repo.exists(id).await? {
        return Err(AppError::not_found(format!("no author with id {id}")));
    }

    // Same check/use gap as update: the record can vanish between the
    // existence check, the load, and the delete.
    let author = state
        .repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("no author with id {id}")))?;

    if !state.repo.delete(author).await? {
        return Err(AppError::persistence("author record was not deleted"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::super::AuthorsModule;
    use super::*;
    use crate::modules::authors::models::Author;
    use crate::modules::authors::repository::MemAuthorRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use folio_authz::ROLE_HEADER;
    use folio_db::StoreResult;
    use folio_kernel::Module;
    use tower::ServiceExt;

    /// Store double whose writes are always refused.
    struct RefusingAuthorRepository {
        seeded: Author,
    }

    #[async_trait]
    impl AuthorRepository for RefusingAuthorRepository {
        async fn find_all(&self) -> StoreResult<Vec<Author>> {
            Ok(vec![self.seeded.clone()])
        }

        async fn find_by_id(&self, id: i64) -> StoreResult<Option<Author>> {
            Ok((id == self.seeded.id).then(|| self.seeded.clone()))
        }

        async fn exists(&self, id: i64) -> StoreResult<bool> {
            Ok(id == self.seeded.id)
        }

        async fn create(&self, _record: Author) -> StoreResult<Option<Author>> {
            Ok(None)
        }

        async fn update(&self, _record: Author) -> StoreResult<bool> {
            Ok(false)
        }

        async fn delete(&self, _record: Author) -> StoreResult<bool> {
            Ok(false)
        }
    }

    fn module() -> AuthorsModule {
        AuthorsModule::new(Arc::new(MemAuthorRepository::new()))
    }

    fn get(uri: &str, roles: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(ROLE_HEADER, roles)
            .body(Body::empty())
            .unwrap()
    }

    fn send_json(method: &str, uri: &str, roles: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(ROLE_HEADER, roles)
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
    async fn list_requires_customer_role() {
        let router = module().routes();

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_requires_administrator_role() {
        let router = module().routes();

        let response = router
            .oneshot(send_json(
                "POST",
                "/",
                "Customer",
                serde_json::json!({"first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn created_author_is_returned_with_generated_id() {
        let module = module();

        let response = module
            .routes()
            .oneshot(send_json(
                "POST",
                "/",
                "Administrator",
                serde_json::json!({"first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = json_body(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["first_name"], "A");
        assert_eq!(created["last_name"], "B");

        // The same record comes back through the read path.
        let response = module
            .routes()
            .oneshot(get("/1", "Customer"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = json_body(response).await;
        assert_eq!(fetched["first_name"], "A");
        assert_eq!(fetched["last_name"], "B");
    }

    #[tokio::test]
    async fn create_with_blank_names_is_rejected() {
        let response = module()
            .routes()
            .oneshot(send_json(
                "POST",
                "/",
                "Administrator",
                serde_json::json!({"first_name": "", "last_name": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn get_absent_author_is_not_found() {
        let response = module()
            .routes()
            .oneshot(get("/999", "Customer"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_with_mismatched_ids_is_rejected() {
        let response = module()
            .routes()
            .oneshot(send_json(
                "PUT",
                "/5",
                "Administrator",
                serde_json::json!({"id": 6, "first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_of_absent_author_is_not_found() {
        let response = module()
            .routes()
            .oneshot(send_json(
                "PUT",
                "/8",
                "Administrator",
                serde_json::json!({"id": 8, "first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_is_not_idempotent_at_the_contract_level() {
        let module = module();

        module
            .routes()
            .oneshot(send_json(
                "POST",
                "/",
                "Administrator",
                serde_json::json!({"first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();

        let first = module
            .routes()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/1")
                    .header(ROLE_HEADER, "Administrator")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        let second = module
            .routes()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/1")
                    .header(ROLE_HEADER, "Administrator")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn refused_writes_surface_as_internal_errors() {
        let seeded = Author {
            id: 1,
            first_name: "A".into(),
            last_name: "B".into(),
        };
        let module = AuthorsModule::new(Arc::new(RefusingAuthorRepository { seeded }));

        let create = module
            .routes()
            .oneshot(send_json(
                "POST",
                "/",
                "Administrator",
                serde_json::json!({"first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();
        assert_eq!(create.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let update = module
            .routes()
            .oneshot(send_json(
                "PUT",
                "/1",
                "Administrator",
                serde_json::json!({"id": 1, "first_name": "A", "last_name": "B"}),
            ))
            .await
            .unwrap();
        assert_eq!(update.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let delete = module
            .routes()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/1")
                    .header(ROLE_HEADER, "Administrator")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
