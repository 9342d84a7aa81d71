use anyhow::{anyhow, Context};
use reqwest::{RequestBuilder, Response};

use folio_app::modules::authors::models::{AuthorCreateDto, AuthorDto, AuthorUpdateDto};
use folio_app::modules::books::models::{BookCreateDto, BookDto, BookUpdateDto};
use folio_app::modules::users::UserDto;
use folio_authz::ROLE_HEADER;

use crate::endpoints::Endpoints;

/// HTTP client for the catalog API.
///
/// Role claims, when present, are attached to every request the way the
/// upstream identity layer would attach them.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    roles: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, roles: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints: Endpoints::new(base_url),
            roles,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn with_roles(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.roles {
            Some(roles) => req.header(ROLE_HEADER, roles),
            None => req,
        }
    }

    async fn expect_success(response: Response) -> anyhow::Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(anyhow!("request failed with {status}: {body}"))
    }

    // Authors

    pub async fn list_authors(&self) -> anyhow::Result<Vec<AuthorDto>> {
        let response = self
            .with_roles(self.http.get(self.endpoints.authors()))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn get_author(&self, id: i64) -> anyhow::Result<AuthorDto> {
        let response = self
            .with_roles(self.http.get(self.endpoints.author(id)))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn create_author(&self, dto: AuthorCreateDto) -> anyhow::Result<AuthorDto> {
        let response = self
            .with_roles(self.http.post(self.endpoints.authors()).json(&dto))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn update_author(&self, dto: AuthorUpdateDto) -> anyhow::Result<()> {
        let response = self
            .with_roles(self.http.put(self.endpoints.author(dto.id)).json(&dto))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn delete_author(&self, id: i64) -> anyhow::Result<()> {
        let response = self
            .with_roles(self.http.delete(self.endpoints.author(id)))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Self::expect_success(response).await?;
        Ok(())
    }

    // Books

    pub async fn list_books(&self) -> anyhow::Result<Vec<BookDto>> {
        let response = self
            .with_roles(self.http.get(self.endpoints.books()))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn get_book(&self, id: i64) -> anyhow::Result<BookDto> {
        let response = self
            .with_roles(self.http.get(self.endpoints.book(id)))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn create_book(&self, dto: BookCreateDto) -> anyhow::Result<BookDto> {
        let response = self
            .with_roles(self.http.post(self.endpoints.books()).json(&dto))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn update_book(&self, dto: BookUpdateDto) -> anyhow::Result<()> {
        let response = self
            .with_roles(self.http.put(self.endpoints.book(dto.id)).json(&dto))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn delete_book(&self, id: i64) -> anyhow::Result<()> {
        let response = self
            .with_roles(self.http.delete(self.endpoints.book(id)))
            .send()
            .await
            .context("failed to reach the catalog API")?;
        Self::expect_success(response).await?;
        Ok(())
    }

    // Identity flow (served by the external identity system)

    pub async fn register(&self, user: &UserDto) -> anyhow::Result<()> {
        let response = self
            .with_roles(self.http.post(self.endpoints.register()).json(user))
            .send()
            .await
            .context("failed to reach the identity service")?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn login(&self, user: &UserDto) -> anyhow::Result<()> {
        let response = self
            .with_roles(self.http.post(self.endpoints.login()).json(user))
            .send()
            .await
            .context("failed to reach the identity service")?;
        Self::expect_success(response).await?;
        Ok(())
    }
}
