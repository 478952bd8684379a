use actix_web::{web, HttpResponse};

use crate::{server::AppContext, Result};

/// Raw review comment, including its diff hunk.
#[tracing::instrument(skip(ctx))]
pub(crate) async fn review_comment_get(
    ctx: web::Data<AppContext>,
    path: web::Path<(String, String, u64)>,
) -> Result<HttpResponse> {
    let (owner, name, comment_id) = path.into_inner();
    let comment = ctx
        .api_service
        .review_comment_get_raw(&owner, &name, comment_id)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}
