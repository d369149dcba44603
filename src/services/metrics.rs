use crate::models::book::Book;
use crate::services::catalog::{Catalog, CatalogError};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("fetching books: {0}")]
    Fetch(#[from] CatalogError),
    #[error("no books found")]
    NoBooksFound,
    #[error("author not found: {0}")]
    AuthorNotFound(String),
    #[error("units sold total overflowed")]
    UnitsSoldOverflow,
}

/// Aggregates over the upstream book list, fetched afresh on every call.
#[derive(Clone)]
pub struct MetricsService {
    catalog: Catalog,
}

impl MetricsService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub async fn mean_units_sold(&self) -> Result<u64, MetricsError> {
        let books = self.load_books().await?;
        mean_units_sold(&books)
    }

    pub async fn cheapest_book(&self) -> Result<Book, MetricsError> {
        let books = self.load_books().await?;
        cheapest_book(&books)
            .cloned()
            .ok_or(MetricsError::NoBooksFound)
    }

    /// Zero matches is reported as [`MetricsError::AuthorNotFound`]; an
    /// unknown author and an author without books look the same.
    pub async fn count_by_author(&self, author: &str) -> Result<usize, MetricsError> {
        let books = self.load_books().await?;
        match count_by_author(&books, author) {
            0 => Err(MetricsError::AuthorNotFound(author.to_string())),
            count => Ok(count),
        }
    }

    async fn load_books(&self) -> Result<Vec<Book>, MetricsError> {
        let books = self.catalog.fetch_books().await?;
        if books.is_empty() {
            return Err(MetricsError::NoBooksFound);
        }
        debug!("Computing metrics over {} books", books.len());
        Ok(books)
    }
}

/// Truncating integer mean of `units_sold`.
pub fn mean_units_sold(books: &[Book]) -> Result<u64, MetricsError> {
    if books.is_empty() {
        return Err(MetricsError::NoBooksFound);
    }

    let total = books
        .iter()
        .try_fold(0u64, |sum, book| sum.checked_add(book.units_sold))
        .ok_or(MetricsError::UnitsSoldOverflow)?;

    Ok(total / books.len() as u64)
}

/// Lowest-priced book; the earliest one wins on ties.
pub fn cheapest_book(books: &[Book]) -> Option<&Book> {
    books.iter().min_by_key(|book| book.price)
}

/// Exact, case-sensitive author match.
pub fn count_by_author(books: &[Book], author: &str) -> usize {
    books.iter().filter(|book| book.author == author).count()
}
