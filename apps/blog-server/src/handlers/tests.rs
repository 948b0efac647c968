use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_infra::InMemoryPostRepository;
use quill_shared::PostForm;

use super::blogs::FORM_LIMIT;
use super::configure_routes;
use crate::middleware::MethodOverride;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

macro_rules! test_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .wrap(MethodOverride)
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(
                    AppState::with_repository($repo).expect("state should build"),
                ))
                .configure(configure_routes),
        )
        .await
    };
}

/// A store that is always down.
struct OfflineRepo;

#[async_trait]
impl BaseRepository<Post, Uuid> for OfflineRepo {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Connection("offline".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::Connection("offline".into()))
    }
}

#[async_trait]
impl PostRepository for OfflineRepo {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Connection("offline".into()))
    }

    async fn insert(&self, _post: NewPost) -> Result<Post, RepoError> {
        Err(RepoError::Connection("offline".into()))
    }

    async fn update(&self, _id: Uuid, _changes: PostChanges) -> Result<Post, RepoError> {
        Err(RepoError::Connection("offline".into()))
    }
}

fn form(title: &str, image: &str, body: &str) -> PostForm {
    PostForm {
        title: Some(title.into()),
        image: Some(image.into()),
        body: Some(body.into()),
    }
}

fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn only_post(repo: &InMemoryPostRepository) -> Post {
    let mut posts = repo.list().await.unwrap();
    assert_eq!(posts.len(), 1);
    posts.remove(0)
}

#[actix_web::test]
async fn root_redirects_to_index() {
    let app = test_app!(Arc::new(InMemoryPostRepository::new()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/blogs");
}

#[actix_web::test]
async fn create_then_list() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/blogs")
        .set_form(form("Vegeta", "https://example.com/v.jpg", "Fan art"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/blogs");

    let post = only_post(&repo).await;
    assert_eq!(post.title, "Vegeta");
    assert_eq!(post.image, "https://example.com/v.jpg");
    assert_eq!(post.body, "Fan art");
    assert!(!post.id.is_nil());

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/blogs").to_request()).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("Vegeta"));
    assert!(body.contains(&format!("/blogs/{}", post.id)));
}

#[actix_web::test]
async fn create_then_show_round_trips_sanitized_fields() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/blogs")
        .set_form(form("Goku", "img", "<b>strong</b><script>alert('x')</script>"))
        .to_request();
    test::call_service(&app, req).await;

    let post = only_post(&repo).await;
    assert_eq!(post.body, "<b>strong</b>");

    let req = test::TestRequest::get()
        .uri(&format!("/blogs/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("Goku"));
    assert!(body.contains("<b>strong</b>"));
    assert!(!body.contains("alert("));
}

#[actix_web::test]
async fn missing_fields_create_empty_values() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/blogs")
        .set_form(PostForm {
            title: Some("Only a title".into()),
            ..Default::default()
        })
        .to_request();
    test::call_service(&app, req).await;

    let post = only_post(&repo).await;
    assert_eq!(post.title, "Only a title");
    assert_eq!(post.image, "");
    assert_eq!(post.body, "");
}

#[actix_web::test]
async fn new_and_edit_forms_render() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let post = repo
        .insert(NewPost {
            title: "Piccolo".into(),
            image: "p.png".into(),
            body: "Namek".into(),
        })
        .await
        .unwrap();
    let app = test_app!(repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/blogs/new").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/blogs/{}/edit", post.id))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains(r#"value="Piccolo""#));
    assert!(body.contains(&format!("/blogs/{}?_method=PUT", post.id)));
}

#[actix_web::test]
async fn unknown_and_malformed_ids_redirect_to_index() {
    let app = test_app!(Arc::new(InMemoryPostRepository::new()));
    let missing = Uuid::new_v4();

    for uri in [
        format!("/blogs/{missing}"),
        format!("/blogs/{missing}/edit"),
        "/blogs/not-an-id".to_string(),
        "/blogs/not-an-id/edit".to_string(),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{uri}");
        assert_eq!(location(&resp), "/blogs", "{uri}");
    }
}

#[actix_web::test]
async fn padded_ids_are_malformed() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let post = repo.insert(NewPost::default()).await.unwrap();
    let app = test_app!(repo.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/blogs/%20{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/blogs");
}

#[actix_web::test]
async fn partial_update_via_method_override() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let original = repo
        .insert(NewPost {
            title: "T".into(),
            image: "I".into(),
            body: "B".into(),
        })
        .await
        .unwrap();
    let app = test_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri(&format!("/blogs/{}?_method=PUT", original.id))
        .set_form(PostForm {
            title: Some("T2".into()),
            ..Default::default()
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/blogs/{}", original.id));

    let updated = only_post(&repo).await;
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.image, original.image);
    assert_eq!(updated.body, original.body);
    assert_eq!(updated.created, original.created);
    assert_eq!(updated.id, original.id);
}

#[actix_web::test]
async fn update_ignores_store_owned_fields() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let original = repo.insert(NewPost::default()).await.unwrap();
    let app = test_app!(repo.clone());

    let smuggled_id = Uuid::new_v4().to_string();
    let req = test::TestRequest::put()
        .uri(&format!("/blogs/{}", original.id))
        .set_form(vec![
            ("title", "T3"),
            ("id", smuggled_id.as_str()),
            ("created", "2000-01-01T00:00:00Z"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), format!("/blogs/{}", original.id));

    let updated = only_post(&repo).await;
    assert_eq!(updated.title, "T3");
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created, original.created);
}

#[actix_web::test]
async fn failed_updates_redirect_to_index() {
    let app = test_app!(Arc::new(InMemoryPostRepository::new()));

    for uri in [format!("/blogs/{}", Uuid::new_v4()), "/blogs/garbage".to_string()] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .set_form(form("T", "I", "B"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{uri}");
        assert_eq!(location(&resp), "/blogs", "{uri}");
    }
}

#[actix_web::test]
async fn delete_is_idempotent_and_leaves_no_trace() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let post = repo.insert(NewPost::default()).await.unwrap();
    let app = test_app!(repo.clone());
    let uri = format!("/blogs/{}?_method=DELETE", post.id);

    for _ in 0..2 {
        let resp = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/blogs");
    }
    assert!(repo.list().await.unwrap().is_empty());

    let deleted = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blogs/{}", post.id))
            .to_request(),
    )
    .await;
    let never = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blogs/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), never.status());
    assert_eq!(location(&deleted), location(&never));
}

#[actix_web::test]
async fn list_keeps_insertion_order_across_updates() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test_app!(repo.clone());

    for title in ["alpha", "bravo", "charlie"] {
        let req = test::TestRequest::post()
            .uri("/blogs")
            .set_form(form(title, "", "text"))
            .to_request();
        test::call_service(&app, req).await;
    }
    let first = repo.list().await.unwrap().remove(0);

    let req = test::TestRequest::put()
        .uri(&format!("/blogs/{}", first.id))
        .set_form(PostForm {
            title: Some("alpha-prime".into()),
            ..Default::default()
        })
        .to_request();
    test::call_service(&app, req).await;

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/blogs").to_request()).await;
    let body = std::str::from_utf8(&body).unwrap();
    let a = body.find("alpha-prime").unwrap();
    let b = body.find("bravo").unwrap();
    let c = body.find("charlie").unwrap();
    assert!(a < b && b < c);
}

#[actix_web::test]
async fn store_failures_follow_the_redirect_policy() {
    let app = test_app!(Arc::new(OfflineRepo));

    // List swallows the error and renders an empty page.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/blogs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("No posts yet."));

    // Create falls back to a blank form.
    let req = test::TestRequest::post()
        .uri("/blogs")
        .set_form(form("Lost", "I", "B"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains(r#"action="/blogs""#));
    assert!(!body.contains("Lost"));

    let id = Uuid::new_v4();
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/blogs/{id}")).to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/blogs");

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri(&format!("/blogs/{id}")).to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/blogs");
}

#[actix_web::test]
async fn long_posts_are_accepted() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test_app!(repo.clone());
    let long_body = "x".repeat(20 * 1024);

    let req = test::TestRequest::post()
        .uri("/blogs")
        .set_form(form("Long", "I", &long_body))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/blogs");

    let post = only_post(&repo).await;
    assert_eq!(post.body.len(), long_body.len());

    let req = test::TestRequest::put()
        .uri(&format!("/blogs/{}", post.id))
        .set_form(form("Longer", "I", &long_body))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), format!("/blogs/{}", post.id));
    assert_eq!(only_post(&repo).await.title, "Longer");
}

#[actix_web::test]
async fn unreadable_create_forms_render_blank_form() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test_app!(repo.clone());

    let oversized = format!("title=Big&body={}", "x".repeat(FORM_LIMIT));
    let requests = [
        test::TestRequest::post()
            .uri("/blogs")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(oversized)
            .to_request(),
        test::TestRequest::post()
            .uri("/blogs")
            .set_json(serde_json::json!({ "title": "Json" }))
            .to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains(r#"action="/blogs""#));
    }
    assert!(repo.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn unreadable_update_forms_redirect_to_index() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let original = repo
        .insert(NewPost {
            title: "Keep".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let app = test_app!(repo.clone());
    let uri = format!("/blogs/{}", original.id);

    let oversized = format!("title=Big&body={}", "x".repeat(FORM_LIMIT));
    let requests = [
        test::TestRequest::put()
            .uri(&uri)
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(oversized)
            .to_request(),
        test::TestRequest::put()
            .uri(&uri)
            .set_json(serde_json::json!({ "title": "Json" }))
            .to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/blogs");
    }
    assert_eq!(only_post(&repo).await, original);
}

#[actix_web::test]
async fn unmatched_routes_are_problem_details() {
    let app = test_app!(Arc::new(InMemoryPostRepository::new()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["title"], "Not Found");
}

#[actix_web::test]
async fn health_and_request_id() {
    let app = test_app!(Arc::new(InMemoryPostRepository::new()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/health")
            .insert_header(("x-request-id", "abc-123"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
}
