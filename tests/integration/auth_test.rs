//! Integration tests for login, signup and logout.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_anonymous_requests_redirect_to_login() {
    let app = helpers::TestApp::new().await;

    for path in ["/", "/documents", "/images", "/videos", "/settings", "/uploads/a.txt"] {
        app.get(path).await.assert_redirect("/login");
    }
}

#[tokio::test]
async fn test_login_page_renders() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/login").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"action="/login""#));
}

#[tokio::test]
async fn test_login_success_sets_session() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;

    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Welcome, admin."));

    // Already logged in: the login page sends us home.
    app.get("/login").await.assert_redirect("/");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form("/login", &[("username", "admin"), ("password", "wrong")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid username or password."));

    app.get("/").await.assert_redirect("/login");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form("/login", &[("username", "nobody"), ("password", "password")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form("/login", &[("username", "admin"), ("password", "password")])
        .await;
    let cookie = response
        .headers
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("session cookie");
    assert!(cookie.starts_with("mediashare_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let app = helpers::TestApp::new().await;

    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/")
                .header("cookie", "mediashare_session=eyJ1c2VybmFtZSI6ImFkbWluIn0"),
            axum::body::Body::empty(),
        )
        .await;
    response.assert_redirect("/login");
}

#[tokio::test]
async fn test_signup_then_login() {
    let app = helpers::TestApp::new().await;
    app.signup("alice", "wonderland").await;

    app.credentials.verify("alice", "wonderland").await.unwrap();
    app.login("alice", "wonderland").await;

    let home = app.get("/").await;
    assert!(home.body.contains("Welcome, alice."));
    assert!(!home.body.contains(r#"action="/upload""#));
}

#[tokio::test]
async fn test_signup_reserved_username() {
    let app = helpers::TestApp::new().await;

    for name in ["admin1", "ADMIN42", "Administrateur7"] {
        let response = app
            .post_form(
                "/signup",
                &[("username", name), ("password", "pw"), ("confirm_password", "pw")],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("This username is not allowed."));
        assert!(!app.credentials.contains(name).await.unwrap());
    }
}

#[tokio::test]
async fn test_signup_reserved_username_wins_over_missing_fields() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form(
            "/signup",
            &[("username", "administrateur5"), ("password", ""), ("confirm_password", "")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("This username is not allowed."));
    assert!(!response.body.contains("Password is required."));
    assert!(!app.credentials.contains("administrateur5").await.unwrap());
}

#[tokio::test]
async fn test_signup_taken_username() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form(
            "/signup",
            &[("username", "admin"), ("password", "x"), ("confirm_password", "x")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Username is already taken."));

    // The administrator's password is untouched.
    app.credentials.verify("admin", "password").await.unwrap();
}

#[tokio::test]
async fn test_signup_password_mismatch() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form(
            "/signup",
            &[("username", "bob"), ("password", "one"), ("confirm_password", "two")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Passwords do not match."));
    assert!(!app.credentials.contains("bob").await.unwrap());
}

#[tokio::test]
async fn test_signup_empty_fields() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_form(
            "/signup",
            &[("username", ""), ("password", "pw"), ("confirm_password", "pw")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Username is required."));
    assert_eq!(app.credentials.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_signup_while_logged_in_revokes_access() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;

    let response = app.get("/signup").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Access revoked. Please log in again!"));

    app.get("/").await.assert_redirect("/login");
}

#[tokio::test]
async fn test_signup_post_while_logged_in_registers_nothing() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;

    let response = app
        .post_form(
            "/signup",
            &[("username", "carol"), ("password", "pw"), ("confirm_password", "pw")],
        )
        .await;
    assert!(response.body.contains("Access revoked. Please log in again!"));
    assert!(!app.credentials.contains("carol").await.unwrap());
    app.get("/").await.assert_redirect("/login");
}

#[tokio::test]
async fn test_logout() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;

    app.get("/logout").await.assert_redirect("/login");
    app.get("/").await.assert_redirect("/login");

    // Logging out twice is harmless.
    app.get("/logout").await.assert_redirect("/login");
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");

    std::fs::remove_file(&app.config.auth.users_file).unwrap();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
