/// Endpoint registry shared by client processes.
///
/// One place holds the base URL and the path suffix of every server
/// resource, including the register/login paths served by the external
/// identity system.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authors(&self) -> String {
        format!("{}/api/authors", self.base_url)
    }

    pub fn author(&self, id: i64) -> String {
        format!("{}/api/authors/{id}", self.base_url)
    }

    pub fn books(&self) -> String {
        format!("{}/api/books", self.base_url)
    }

    pub fn book(&self, id: i64) -> String {
        format!("{}/api/books/{id}", self.base_url)
    }

    pub fn register(&self) -> String {
        format!("{}/api/users/register", self.base_url)
    }

    pub fn login(&self) -> String {
        format!("{}/api/users/login", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}
