//! Integration tests for the settings page and preferences.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_settings_page() {
    let app = helpers::TestApp::new().await;
    app.signup("dora", "explorer").await;
    app.login("dora", "explorer").await;

    let response = app.get("/settings").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"action="/change-password""#));
    assert!(response.body.contains(r#"action="/change-theme""#));
    assert!(response.body.contains(r#"action="/change-font""#));
}

#[tokio::test]
async fn test_change_password() {
    let app = helpers::TestApp::new().await;
    app.signup("erin", "old-pass").await;
    app.login("erin", "old-pass").await;

    app.post_form(
        "/change-password",
        &[("current_password", "old-pass"), ("new_password", "new-pass")],
    )
    .await
    .assert_redirect("/settings");

    app.credentials.verify("erin", "new-pass").await.unwrap();
    assert!(app.credentials.verify("erin", "old-pass").await.is_err());
}

#[tokio::test]
async fn test_change_password_wrong_current_is_forbidden() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;

    let response = app
        .post_form(
            "/change-password",
            &[("current_password", "nope"), ("new_password", "hacked")],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body, "Current password is incorrect.");

    app.credentials.verify("admin", "password").await.unwrap();
}

#[tokio::test]
async fn test_change_password_requires_login() {
    let app = helpers::TestApp::new().await;

    app.post_form(
        "/change-password",
        &[("current_password", "password"), ("new_password", "x")],
    )
    .await
    .assert_redirect("/login");

    app.credentials.verify("admin", "password").await.unwrap();
}

#[tokio::test]
async fn test_theme_and_font_apply_to_pages() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;

    app.post_form("/change-theme", &[("theme", "dark")])
        .await
        .assert_redirect("/settings");
    app.post_form("/change-font", &[("font", "monospace")])
        .await
        .assert_redirect("/settings");

    let page = app.get("/documents").await;
    assert!(page.body.contains(r#"class="theme-dark""#));
    assert!(page.body.contains("font-family: monospace"));

    // The identity survives a preference change.
    assert!(app.get("/").await.body.contains("Welcome, admin."));
}

#[tokio::test]
async fn test_preferences_survive_logout() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;
    app.post_form("/change-theme", &[("theme", "dark")]).await;

    app.get("/logout").await.assert_redirect("/login");

    let login = app.get("/login").await;
    assert!(login.body.contains(r#"class="theme-dark""#));
}

#[tokio::test]
async fn test_preference_values_are_escaped() {
    let app = helpers::TestApp::new().await;
    app.login_admin().await;
    app.post_form("/change-font", &[("font", "x\"><script>alert(1)</script>")])
        .await;

    let page = app.get("/settings").await;
    assert!(!page.body.contains("<script>alert(1)</script>"));
    assert!(page.body.contains("&lt;script&gt;"));
}
