//! RESTful blog routes.
//!
//! Every service failure is logged with its kind and then folded into a
//! redirect (or, for list/create, a normal page), so callers never see a
//! distinct error for a missing or malformed id.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use minijinja::context;

use quill_core::BlogError;
use quill_shared::{PostForm, PostView};

use crate::middleware::error::AppResult;
use crate::state::AppState;

const INDEX: &str = "/blogs";

/// Largest accepted urlencoded post form, in bytes.
pub const FORM_LIMIT: usize = 1024 * 1024;

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn page<S: serde::Serialize>(state: &AppState, template: &str, ctx: S) -> AppResult<HttpResponse> {
    let html = state.views.render(template, ctx)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

fn log_failure(operation: &'static str, err: &BlogError) {
    match err {
        BlogError::Store(_) => {
            tracing::error!(operation, kind = err.kind(), error = %err, "Blog operation failed")
        }
        _ => tracing::warn!(operation, kind = err.kind(), error = %err, "Blog operation failed"),
    }
}

/// The body could not be read as a post form (wrong content type, too large, malformed).
fn log_rejected_form(operation: &'static str, err: &actix_web::Error) {
    tracing::warn!(operation, kind = "bad_form", error = %err, "Post form rejected");
}

/// GET /
pub async fn root() -> HttpResponse {
    redirect(INDEX)
}

/// GET /blogs
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = match state.blog.list().await {
        Ok(posts) => posts,
        Err(e) => {
            log_failure("list", &e);
            Vec::new()
        }
    };

    let blogs: Vec<PostView> = posts.into_iter().map(PostView::from).collect();
    page(&state, "index.html", context! { blogs })
}

/// GET /blogs/new
pub async fn new_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    page(&state, "new.html", context! {})
}

/// POST /blogs
pub async fn create(
    state: web::Data<AppState>,
    form: Result<web::Form<PostForm>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            log_rejected_form("create", &e);
            return page(&state, "new.html", context! {});
        }
    };

    match state.blog.create(form.into_new_post()).await {
        Ok(_) => Ok(redirect(INDEX)),
        Err(e) => {
            log_failure("create", &e);
            page(&state, "new.html", context! {})
        }
    }
}

/// GET /blogs/{id}
pub async fn show(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    match state.blog.show(&id).await {
        Ok(post) => page(&state, "show.html", context! { blog => PostView::from(post) }),
        Err(e) => {
            log_failure("show", &e);
            Ok(redirect(INDEX))
        }
    }
}

/// GET /blogs/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    match state.blog.edit_form(&id).await {
        Ok(post) => page(&state, "edit.html", context! { blog => PostView::from(post) }),
        Err(e) => {
            log_failure("edit", &e);
            Ok(redirect(INDEX))
        }
    }
}

/// PUT /blogs/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<String>,
    form: Result<web::Form<PostForm>, actix_web::Error>,
) -> HttpResponse {
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            log_rejected_form("update", &e);
            return redirect(INDEX);
        }
    };

    match state.blog.update(&id, form.into_changes()).await {
        Ok(post) => redirect(&format!("{INDEX}/{}", post.id)),
        Err(e) => {
            log_failure("update", &e);
            redirect(INDEX)
        }
    }
}

/// DELETE /blogs/{id}
pub async fn destroy(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    if let Err(e) = state.blog.delete(&id).await {
        log_failure("delete", &e);
    }
    redirect(INDEX)
}
