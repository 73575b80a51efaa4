//! Tests for the server-rendered pages and the session flow

mod common;

use axum::http::StatusCode;
use common::{seed_book, seed_staff, test_server};

#[tokio::test]
async fn home_page_renders() {
    let (server, _state) = test_server().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Lectern"));
}

#[tokio::test]
async fn register_login_and_member_dashboard() {
    let (server, _state) = test_server().await;

    let response = server
        .post("/register/")
        .form(&[
            ("username", "newbie"),
            ("email", "newbie@example.com"),
            ("password1", "secret"),
            ("password2", "secret"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login/");

    let response = server
        .post("/login/")
        .form(&[("username", "newbie"), ("password", "secret")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/user-dashboard/");

    // The session cookie set at login carries over
    let response = server.get("/user-dashboard/").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("newbie"));
    assert!(text.contains("Available books"));
}

#[tokio::test]
async fn staff_login_lands_on_the_admin_dashboard() {
    let (server, state) = test_server().await;
    seed_staff(&state, "curator").await;
    seed_book(&state, "Invisible Cities", 2).await;

    let response = server
        .post("/login/")
        .form(&[("username", "curator"), ("password", "password")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin-dashboard/");

    let response = server.get("/admin-dashboard/").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("curator"));
    assert!(text.contains("Invisible Cities"));
}

#[tokio::test]
async fn dashboards_require_a_session() {
    let (server, _state) = test_server().await;

    for path in ["/admin-dashboard/", "/user-dashboard/"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/login/");
    }
}

#[tokio::test]
async fn logout_clears_the_session() {
    let (server, _state) = test_server().await;

    server
        .post("/register/")
        .form(&[
            ("username", "transient"),
            ("email", "transient@example.com"),
            ("password1", "secret"),
            ("password2", "secret"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    server
        .post("/login/")
        .form(&[("username", "transient"), ("password", "secret")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let response = server.get("/logout/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login/");

    let response = server.get("/user-dashboard/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login/");
}

#[tokio::test]
async fn mismatched_passwords_do_not_create_an_account() {
    let (server, _state) = test_server().await;

    let response = server
        .post("/register/")
        .form(&[
            ("username", "careless"),
            ("email", "careless@example.com"),
            ("password1", "secret"),
            ("password2", "different"),
        ])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Passwords don&#x27;t match"));

    // No account behind the rejected form
    let response = server
        .post("/login/")
        .form(&[("username", "careless"), ("password", "secret")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Invalid username or password"));
}

#[tokio::test]
async fn duplicate_username_is_reported_on_the_form() {
    let (server, _state) = test_server().await;

    server
        .post("/register/")
        .form(&[
            ("username", "twice"),
            ("email", "twice@example.com"),
            ("password1", "secret"),
            ("password2", "secret"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let response = server
        .post("/register/")
        .form(&[
            ("username", "twice"),
            ("email", "twice@example.com"),
            ("password1", "secret"),
            ("password2", "secret"),
        ])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("already taken"));
}

#[tokio::test]
async fn bad_credentials_re_render_the_login_form() {
    let (server, _state) = test_server().await;

    let response = server
        .post("/login/")
        .form(&[("username", "nobody"), ("password", "wrong")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Invalid username or password"));
}

#[tokio::test]
async fn member_dashboard_lists_borrowed_books() {
    let (server, state) = test_server().await;
    let book = seed_book(&state, "The Lathe of Heaven", 1).await;

    server
        .post("/register/")
        .form(&[
            ("username", "borrower"),
            ("email", "borrower@example.com"),
            ("password1", "secret"),
            ("password2", "secret"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    server
        .post("/login/")
        .form(&[("username", "borrower"), ("password", "secret")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    // Borrow through the flat API on the session alone, no body
    let response = server
        .post(&format!("/api/user/books/borrow/{}/", book.id))
        .await;
    response.assert_status_ok();

    let response = server.get("/user-dashboard/").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("My borrowed books"));
    assert!(text.contains("The Lathe of Heaven"));
}
