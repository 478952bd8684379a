//! Repository registry routes.

use actix_web::{web, HttpResponse};
use evalbot_database_interface::DatabaseError;
use evalbot_models::{Pagination, RepositoryFilter};
use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::{server::AppContext, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoriesQuery {
    #[serde(default)]
    skip: u64,
    limit: Option<u64>,
    #[serde(default)]
    enabled_only: bool,
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn repositories_list(
    ctx: web::Data<AppContext>,
    query: web::Query<RepositoriesQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let repositories = ctx
        .db_service
        .repositories_list(RepositoryFilter {
            enabled_only: query.enabled_only,
            pagination: Pagination::new(
                query.skip,
                query.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
            ),
        })
        .await?;

    Ok(HttpResponse::Ok().json(&repositories))
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn repositories_get(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    // Slashes may come percent-encoded.
    let repo_name = percent_decode_str(&path.into_inner())
        .decode_utf8_lossy()
        .to_string();

    match ctx.db_service.repositories_get(&repo_name).await? {
        Some(repository) => Ok(HttpResponse::Ok().json(&repository)),
        None => Err(DatabaseError::UnknownRepository(repo_name).into()),
    }
}
