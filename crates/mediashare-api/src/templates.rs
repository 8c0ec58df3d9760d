//! HTML pages for the web interface.
//!
//! Simple inline HTML templates without a template engine. Every page runs
//! through [`layout`], which applies the session's theme and font.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use mediashare_auth::session::{Preference, SessionData};
use mediashare_core::traits::storage::StorageObjectMeta;
use mediashare_core::types::MediaCategory;

/// Shown when a logged-in user opens the signup page.
pub const ACCESS_REVOKED: &str = "Access revoked. Please log in again!";

const STYLES: &str = r#"
    body { font-family: sans-serif; max-width: 960px; margin: 32px auto; padding: 0 16px; background: #f5f5f5; color: #222; }
    body.theme-dark { background: #1e1e1e; color: #e6e6e6; }
    body.theme-dark a { color: #7fb8ff; }
    nav a { margin-right: 12px; }
    .container { background: inherit; padding: 16px 0; }
    .error { color: #a94442; background: #f2dede; padding: 8px 12px; border-radius: 4px; }
    .file { display: flex; align-items: center; gap: 12px; padding: 8px 0; border-bottom: 1px solid #ddd; }
    .file img, .file video { max-width: 320px; max-height: 240px; }
    .size { color: #888; font-size: 0.85em; }
    form.inline { display: inline; }
    label { display: block; margin-top: 8px; }
"#;

/// Escape text for HTML element and attribute context.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Characters escaped in a URL path segment: everything except RFC 3986
/// unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a file name for use as one URL path segment.
pub fn encode_path_segment(input: &str) -> String {
    utf8_percent_encode(input, PATH_SEGMENT).to_string()
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

fn layout(session: &SessionData, title: &str, body: &str) -> String {
    let theme = session.preference(Preference::Theme).unwrap_or("light");
    let font_style = session
        .preference(Preference::Font)
        .map(|f| format!(r#" style="font-family: {}""#, escape_html(f)))
        .unwrap_or_default();

    let nav = if session.is_authenticated() {
        let mut nav = String::from(r#"<nav><a href="/">Home</a>"#);
        for category in MediaCategory::ALL {
            let _ = write!(nav, r#"<a href="/{}">{}</a>"#, category.as_str(), category.title());
        }
        nav.push_str(r#"<a href="/settings">Settings</a><a href="/logout">Log out</a></nav>"#);
        nav
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - mediashare</title>
<style>{STYLES}</style>
</head>
<body class="theme-{theme}"{font_style}>
{nav}
<div class="container">
<h1>{title}</h1>
{body}
</div>
</body>
</html>"#,
        title = escape_html(title),
        theme = escape_html(theme),
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default()
}

/// Login form, optionally with an error message.
pub fn login_page(session: &SessionData, error: Option<&str>) -> String {
    let body = format!(
        r#"{error}
<form method="post" action="/login">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a></p>"#,
        error = error_block(error),
    );
    layout(session, "Log in", &body)
}

/// Signup form, optionally with an error message.
pub fn signup_page(session: &SessionData, error: Option<&str>) -> String {
    let body = format!(
        r#"{error}
<form method="post" action="/signup">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirm_password" required></label>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        error = error_block(error),
    );
    layout(session, "Sign up", &body)
}

fn upload_form() -> &'static str {
    r#"<form method="post" action="/upload" enctype="multipart/form-data">
<input type="file" name="file" required>
<button type="submit">Upload</button>
</form>"#
}

/// Home page. The administrator also gets the upload form.
pub fn home_page(session: &SessionData, username: &str, is_admin: bool) -> String {
    let mut body = format!("<p>Welcome, {}.</p><ul>", escape_html(username));
    for category in MediaCategory::ALL {
        let _ = write!(
            body,
            r#"<li><a href="/{}">{}</a></li>"#,
            category.as_str(),
            category.title()
        );
    }
    body.push_str("</ul>");
    if is_admin {
        body.push_str("<h2>Upload a file</h2>");
        body.push_str(upload_form());
    }
    layout(session, "Home", &body)
}

/// Listing of one category's files.
pub fn category_page(
    session: &SessionData,
    category: MediaCategory,
    files: &[StorageObjectMeta],
    is_admin: bool,
) -> String {
    let mut body = String::new();
    if is_admin {
        body.push_str(upload_form());
    }
    if files.is_empty() {
        body.push_str("<p>No files yet.</p>");
    }

    for file in files {
        let href = format!("/uploads/{}", encode_path_segment(&file.name));
        let name = escape_html(&file.name);
        let preview = match category {
            MediaCategory::Images => format!(r#"<img src="{href}" alt="{name}">"#),
            MediaCategory::Videos => format!(r#"<video src="{href}" controls></video>"#),
            MediaCategory::Documents => String::new(),
        };
        let delete = if is_admin {
            format!(
                r#"<form class="inline" method="post" action="/delete/{}"><button type="submit">Delete</button></form>"#,
                encode_path_segment(&file.name)
            )
        } else {
            String::new()
        };
        let _ = write!(
            body,
            r#"<div class="file">{preview}<a href="{href}">{name}</a><span class="size">{size}</span>{delete}</div>"#,
            size = human_size(file.size_bytes),
        );
    }

    layout(session, category.title(), &body)
}

/// Preferences and password change forms.
pub fn settings_page(session: &SessionData) -> String {
    let theme = session.preference(Preference::Theme).unwrap_or("light");
    let font = session.preference(Preference::Font).unwrap_or("sans-serif");
    let body = format!(
        r#"<h2>Password</h2>
<form method="post" action="/change-password">
<label>Current password <input type="password" name="current_password" required></label>
<label>New password <input type="password" name="new_password" required></label>
<button type="submit">Change password</button>
</form>
<h2>Theme</h2>
<form method="post" action="/change-theme">
<select name="theme">{themes}</select>
<button type="submit">Apply</button>
</form>
<h2>Font</h2>
<form method="post" action="/change-font">
<select name="font">{fonts}</select>
<button type="submit">Apply</button>
</form>"#,
        themes = options(&["light", "dark"], theme),
        fonts = options(&["sans-serif", "serif", "monospace"], font),
    );
    layout(session, "Settings", &body)
}

fn options(values: &[&str], selected: &str) -> String {
    values
        .iter()
        .map(|v| {
            let marker = if *v == selected { " selected" } else { "" };
            format!(r#"<option value="{v}"{marker}>{v}</option>"#)
        })
        .collect()
}
