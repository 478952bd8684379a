use actix_http::StatusCode;
use actix_web::{web, HttpResponse, Responder};

use crate::server::AppContext;

pub(crate) async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let database = ctx.db_service.health_check().await.is_ok();
    let (status_code, status) = if database {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy")
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "status": status,
        "database": database,
    }))
}
