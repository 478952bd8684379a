//! Statistics routes.

use actix_web::{web, HttpResponse};
use evalbot_core::use_cases::stats::{BuildStatisticsInterface, Statistics};
use serde::Deserialize;
use shaku::HasComponent;

use crate::{server::AppContext, Result, ServerError};

const DEFAULT_TREND_DAYS: u32 = 7;
const MAX_TREND_DAYS: u32 = 365;

#[derive(Debug, Deserialize)]
pub(crate) struct StatsQuery {
    repo_name: Option<String>,
    days: Option<u32>,
}

impl StatsQuery {
    fn days(&self) -> Result<u32> {
        let days = self.days.unwrap_or(DEFAULT_TREND_DAYS);
        if (1..=MAX_TREND_DAYS).contains(&days) {
            Ok(days)
        } else {
            Err(ServerError::bad_request(format!(
                "days must be between 1 and {MAX_TREND_DAYS}"
            )))
        }
    }
}

async fn build_statistics(ctx: &AppContext, query: StatsQuery) -> Result<Statistics> {
    let days = query.days()?;
    let build_statistics: &dyn BuildStatisticsInterface = ctx.core_module.resolve_ref();

    Ok(build_statistics
        .run(&ctx.as_core_context(), query.repo_name, days)
        .await?)
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn repository_stats(
    ctx: web::Data<AppContext>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse> {
    let statistics = build_statistics(&ctx, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(&statistics.repositories))
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn version_stats(
    ctx: web::Data<AppContext>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse> {
    let statistics = build_statistics(&ctx, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(&statistics.versions))
}

#[tracing::instrument(skip(ctx))]
pub(crate) async fn trend_stats(
    ctx: web::Data<AppContext>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse> {
    let statistics = build_statistics(&ctx, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(&statistics.trends))
}
