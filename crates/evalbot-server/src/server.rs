//! Server module.

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use evalbot_config::{ApiDriver, Config};
use evalbot_core::{CoreContext, CoreModule};
use evalbot_database_interface::DbService;
use evalbot_ghapi_interface::ApiService;
use evalbot_ghapi_null::NullApiService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    ghapi::MetricsApiService,
    github::review_comment_get,
    health::health_check_route,
    metrics::build_metrics_handler,
    repos::{repositories_get, repositories_list},
    reviews::{reviews_get, reviews_list},
    stats::{repository_stats, trend_stats, version_stats},
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
    /// API adapter
    pub api_service: Box<dyn ApiService>,
}

impl AppContext {
    /// Create new app context, picking the API adapter from configuration.
    pub fn new(config: Config, core_module: CoreModule, db_service: Box<dyn DbService>) -> Self {
        let api_service: Box<dyn ApiService> = match config.api.driver {
            ApiDriver::GitHub => Box::new(MetricsApiService::new(config.clone())),
            ApiDriver::Null => Box::new(NullApiService::new()),
        };

        Self::new_with_adapters(config, core_module, db_service, api_service)
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
        api_service: Box<dyn ApiService>,
    ) -> Self {
        Self {
            config,
            core_module,
            db_service,
            api_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            api_service: self.api_service.as_ref(),
            db_service: self.db_service.as_ref(),
            core_module: &self.core_module,
        }
    }
}

fn build_cors(config: &Config) -> Cors {
    let origin = &config.server.cors_allowed_origin;
    if origin.is_empty() {
        Cors::permissive()
    } else {
        Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
    }
}

fn json_error(detail: String) -> error::Error {
    error::InternalError::from_response(
        "",
        HttpResponse::BadRequest().json(serde_json::json!({ "detail": detail })),
    )
    .into()
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = build_cors(&context.config);

    App::new()
        .app_data(context)
        .wrap(cors)
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(
            web::scope("/repos")
                .route("", web::get().to(repositories_list))
                .route("/{repo_name:.*}", web::get().to(repositories_get)),
        )
        .service(
            web::scope("/reviews")
                .route("", web::get().to(reviews_list))
                .route("/{ai_review_id:.*}", web::get().to(reviews_get)),
        )
        .service(
            web::scope("/stats")
                .route("/repositories", web::get().to(repository_stats))
                .route("/versions", web::get().to(version_stats))
                .route("/trends", web::get().to(trend_stats)),
        )
        .route(
            "/github/comment/{owner}/{name}/{comment_id}",
            web::get().to(review_comment_get),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on evalbot!" }))
            }),
        )
        .app_data(
            web::QueryConfig::default().error_handler(|err, _req| json_error(err.to_string())),
        )
        .app_data(
            web::PathConfig::default().error_handler(|err, _req| json_error(err.to_string())),
        )
        .app_data(
            web::JsonConfig::default().error_handler(|err, _req| json_error(err.to_string())),
        )
}

/// Run bot server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting evalbot server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();
    let prometheus = build_metrics_handler()?;

    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
