use crate::models::book::Book;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("creating request: {0}")]
    RequestConstruction(#[source] reqwest::Error),
    #[error("executing request: {0}")]
    RequestExecution(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the full book listing. Every call is a fresh fetch.
#[async_trait]
pub trait BookCatalog {
    async fn fetch_books(&self) -> Result<Vec<Book>, CatalogError>;
}

pub type Catalog = Arc<dyn BookCatalog + Send + Sync>;

pub struct HttpBookCatalog {
    client: reqwest::Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpBookCatalog {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: None,
        }
    }

    /// Deadline for each outbound fetch. Expiry is reported as
    /// [`CatalogError::RequestExecution`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BookCatalog for HttpBookCatalog {
    async fn fetch_books(&self) -> Result<Vec<Book>, CatalogError> {
        let mut builder = self.client.get(&self.url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let request = builder.build().map_err(CatalogError::RequestConstruction)?;

        debug!("Fetching books from {}", self.url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(CatalogError::RequestExecution)?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!("Upstream {} responded with status {}", self.url, status);
            return Err(CatalogError::UnexpectedStatus(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(CatalogError::RequestExecution)?;
        let books: Vec<Book> = serde_json::from_slice(&body)?;

        info!("Fetched {} books from upstream", books.len());
        Ok(books)
    }
}

/// Fixed in-process catalog, either serving a book list or failing with a
/// given upstream status on every fetch.
#[derive(Default)]
pub struct InMemoryBookCatalog {
    books: Vec<Book>,
    failure: Option<u16>,
    fetches: AtomicUsize,
}

impl InMemoryBookCatalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            failure: Some(status),
            ..Self::default()
        }
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookCatalog for InMemoryBookCatalog {
    async fn fetch_books(&self) -> Result<Vec<Book>, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(status) => Err(CatalogError::UnexpectedStatus(status)),
            None => Ok(self.books.clone()),
        }
    }
}
