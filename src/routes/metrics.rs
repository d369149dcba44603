use crate::models::book::Book;
use crate::models::responses::{CountResponse, MeanUnitsSoldResponse};
use crate::services::metrics::{MetricsError, MetricsService};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    response::Json,
};
use tracing::{info, warn};

pub async fn mean_units_sold(
    State(metrics): State<MetricsService>,
) -> Result<Json<MeanUnitsSoldResponse>, MetricsError> {
    let mean_units_sold = metrics.mean_units_sold().await?;
    Ok(Json(MeanUnitsSoldResponse { mean_units_sold }))
}

pub async fn cheapest_book(
    State(metrics): State<MetricsService>,
) -> Result<Json<Book>, MetricsError> {
    let book = metrics.cheapest_book().await?;
    Ok(Json(book))
}

/// A segment that does not decode to UTF-8 is matched in its raw,
/// still-encoded form.
pub async fn count_by_author(
    author: Result<Path<String>, PathRejection>,
    uri: Uri,
    State(metrics): State<MetricsService>,
) -> Result<Json<CountResponse>, MetricsError> {
    let author = match author {
        Ok(Path(author)) => author,
        Err(rejection) => {
            warn!("Using raw author segment: {}", rejection);
            raw_last_segment(&uri).to_string()
        }
    };

    info!("Counting books by author {:?}", author);

    let count = metrics.count_by_author(&author).await?;
    Ok(Json(CountResponse { count }))
}

fn raw_last_segment(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}
