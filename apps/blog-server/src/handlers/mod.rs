//! HTTP handlers and route configuration.

mod blogs;
mod health;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(blogs::FORM_LIMIT))
        .route("/", web::get().to(blogs::root))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/blogs")
                .route("", web::get().to(blogs::index))
                .route("", web::post().to(blogs::create))
                // Must be registered before `/{id}`.
                .route("/new", web::get().to(blogs::new_form))
                .route("/{id}", web::get().to(blogs::show))
                .route("/{id}", web::put().to(blogs::update))
                .route("/{id}", web::patch().to(blogs::update))
                .route("/{id}", web::delete().to(blogs::destroy))
                .route("/{id}/edit", web::get().to(blogs::edit_form)),
        )
        .default_service(web::to(not_found));
}

/// Fallback for unmatched routes.
async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("{} {}", req.method(), req.path())))
}
