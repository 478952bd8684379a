//! Review routes.

use actix_web::{web, HttpResponse};
use evalbot_database_interface::DatabaseError;
use evalbot_models::{Pagination, Review, ReviewFilter, Sentiment};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::{server::AppContext, Result, ServerError};

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewsQuery {
    #[serde(default)]
    skip: u64,
    limit: Option<u64>,
    sentiment: Option<String>,
    repo_name: Option<String>,
}

impl ReviewsQuery {
    fn into_filter(self) -> Result<ReviewFilter> {
        let sentiment = self
            .sentiment
            .as_deref()
            .map(Sentiment::try_from)
            .transpose()
            .map_err(|e| ServerError::bad_request(e.to_string()))?;

        Ok(ReviewFilter {
            sentiment,
            repo_name: self.repo_name,
            pagination: Pagination::new(
                self.skip,
                self.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
            ),
        })
    }
}

/// Review as exposed by the API, with its derived web URL.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewResponse {
    #[serde(flatten)]
    review: Review,
    review_comment_web_url: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            review_comment_web_url: review.review_comment_web_url(),
            review,
        }
    }
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn reviews_list(
    ctx: web::Data<AppContext>,
    query: web::Query<ReviewsQuery>,
) -> Result<HttpResponse> {
    let filter = query.into_inner().into_filter()?;
    let reviews: Vec<ReviewResponse> = ctx
        .db_service
        .reviews_list(filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(&reviews))
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn reviews_get(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let ai_review_id = percent_decode_str(&path.into_inner())
        .decode_utf8_lossy()
        .to_string();

    match ctx.db_service.reviews_get(&ai_review_id).await? {
        Some(review) => Ok(HttpResponse::Ok().json(ReviewResponse::from(review))),
        None => Err(DatabaseError::UnknownReview(ai_review_id).into()),
    }
}
