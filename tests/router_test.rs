mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::json;
use tower::ServiceExt;

use backstage::routes;

use common::{comment, page, performance, post, Harness, Reply};

async fn send(h: &Harness, request: Request<Body>) -> Response {
    routes::router(h.state.clone()).oneshot(request).await.unwrap()
}

async fn get(h: &Harness, uri: &str) -> Response {
    send(h, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(h: &Harness, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(h, request).await
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_home_renders_without_backend_calls() {
    let h = Harness::start(|_| Reply::json(json!({}))).await;

    let response = get(&h, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Backstage Stories"));
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_logout_flips_navigation_links() {
    let h = Harness::start(|_| Reply::json(json!({}))).await;
    h.log_in("kim");

    let body = body_text(get(&h, "/").await).await;
    assert!(body.contains("Logout"));
    assert!(body.contains("Community"));
    assert!(!body.contains("Sign Up"));

    let response = post_form(&h, "/logout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(h.state.session.token().is_none());
    assert!(h.state.session.username().is_none());

    let body = body_text(get(&h, "/").await).await;
    assert!(body.contains("Login"));
    assert!(body.contains("Sign Up"));
    assert!(!body.contains("Logout"));
    assert!(!body.contains("Community"));
}

#[tokio::test]
async fn test_three_pages_render_three_links() {
    let h = Harness::start(|_| Reply::json(page(vec![performance(1, "Hamlet")], 3))).await;

    let body = body_text(get(&h, "/performances").await).await;
    assert!(body.contains("Hamlet"));
    assert_eq!(body.matches("class=\"page").count(), 3);
    assert!(body.contains("page=2"));

    h.backend.clear();
    let response = get(&h, "/performances?page=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let requests = h.backend.requests();
    assert_eq!(requests[0].param("page").as_deref(), Some("1"));
}

#[tokio::test]
async fn test_single_page_hides_pagination() {
    let h = Harness::start(|_| Reply::json(page(vec![post(1, "Only", "kim")], 1))).await;

    let body = body_text(get(&h, "/posts").await).await;
    assert!(body.contains("Only"));
    assert!(!body.contains("class=\"pagination\""));
}

#[tokio::test]
async fn test_post_list_query_reaches_backend() {
    let h = Harness::start(|_| Reply::json(page(vec![], 1))).await;

    get(&h, "/posts?type=QUESTION&spoiler=ALL&performanceId=4&page=1").await;
    let requests = h.backend.requests();
    assert_eq!(requests[0].path, "/api/posts/performance/4/type/question");
}

#[tokio::test]
async fn test_unlisted_filter_values_stay_on_list_endpoints() {
    let h = Harness::start(|_| Reply::json(page(vec![], 1))).await;

    get(&h, "/posts?type=..%2F..%2F..%2F..%2Fauth%2Fme%3Fx%3D").await;
    get(&h, "/performances?status=..%2F..%2Fauth%2Fme").await;

    let requests = h.backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/api/posts");
    assert_eq!(requests[1].path, "/api/performances");
    assert!(requests.iter().all(|r| r.param("x").is_none()));
}

#[tokio::test]
async fn test_uppercase_spoiler_value_filters() {
    let h = Harness::start(|_| Reply::json(page(vec![], 1))).await;

    get(&h, "/posts?spoiler=TRUE").await;
    let requests = h.backend.requests();
    assert_eq!(requests[0].path, "/api/posts/performance/all/spoiler/true");
}

#[tokio::test]
async fn test_write_button_disabled_for_anonymous() {
    let h = Harness::start(|_| Reply::json(page(vec![], 1))).await;

    let body = body_text(get(&h, "/posts").await).await;
    assert!(body.contains("disabled>글쓰기"));

    h.log_in("kim");
    let body = body_text(get(&h, "/posts").await).await;
    assert!(!body.contains("disabled>글쓰기"));
}

#[tokio::test]
async fn test_failed_list_renders_fallback_alert() {
    let h = Harness::start(|_| Reply::status(StatusCode::BAD_GATEWAY, json!({}))).await;

    let body = body_text(get(&h, "/performances").await).await;
    assert!(body.contains("공연 목록을 불러오는데 실패했습니다."));
    assert!(!body.contains("로딩 중..."));
}

#[tokio::test]
async fn test_superseded_list_request_renders_its_own_page() {
    let h = Harness::start(|req| {
        let keyword = req.param("keyword").unwrap_or_default();
        let reply = Reply::json(page(vec![post(1, &format!("{} night", keyword), "kim")], 1));
        if keyword == "alpha" {
            reply.delayed(50)
        } else {
            reply.delayed(400)
        }
    })
    .await;

    let app = routes::router(h.state.clone());
    let first = tokio::spawn(
        app.clone()
            .oneshot(Request::builder().uri("/posts?keyword=alpha").body(Body::empty()).unwrap()),
    );
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let second = tokio::spawn(
        app.oneshot(Request::builder().uri("/posts?keyword=beta").body(Body::empty()).unwrap()),
    );

    let body = body_text(first.await.unwrap().unwrap()).await;
    assert!(body.contains("alpha night"));
    assert!(!body.contains("로딩 중..."));

    let body = body_text(second.await.unwrap().unwrap()).await;
    assert!(body.contains("beta night"));
}

#[tokio::test]
async fn test_login_form_redirects_and_stores_session() {
    let h = Harness::start(|_| {
        Reply::json(json!({ "token": "jwt-abc", "type": "Bearer", "username": "kim" }))
    })
    .await;

    let response = post_form(&h, "/login", "username=kim&password=pw").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(h.state.session.is_authenticated());
}

#[tokio::test]
async fn test_signup_requires_fields_before_calling_backend() {
    let h = Harness::start(|_| Reply::json(json!({}))).await;

    let response = post_form(&h, "/signup", "username=kim&email=&password=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("필수 항목을 입력해주세요."));
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_anonymous_vote_renders_login_required() {
    let h = Harness::start(|req| match req.path.as_str() {
        "/api/posts/5" => Reply::json(post(5, "The ending", "kim")),
        _ => Reply::json(json!([comment(1, "first")])),
    })
    .await;

    let response = post_form(&h, "/posts/5/vote", "vote_type=LIKE").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("로그인이 필요합니다."));
    assert!(h.backend.requests_to("/api/votes").is_empty());
}

#[tokio::test]
async fn test_reply_link_selects_parent() {
    let h = Harness::start(|req| match req.path.as_str() {
        "/api/posts/5" => Reply::json(post(5, "The ending", "kim")),
        _ => Reply::json(json!([comment(1, "first")])),
    })
    .await;
    h.log_in("kim");

    let body = body_text(get(&h, "/posts/5?reply_to=1").await).await;
    assert!(body.contains("lee님에게 답글을 작성합니다."));
    assert!(body.contains("name=\"parent_id\" value=\"1\""));
    assert!(body.contains("/posts/5/delete"));
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let h = Harness::start(|_| Reply::json(json!({}))).await;

    assert_eq!(get(&h, "/posts/new").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&h, "/nowhere").await.status(), StatusCode::NOT_FOUND);
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_stylesheet_is_embedded() {
    let h = Harness::start(|_| Reply::json(json!({}))).await;

    let response = get(&h, "/assets/css/app.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
}
