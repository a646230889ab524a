//! HTML templates for the web host
//!
//! Simple inline HTML templates without a template engine. Site documents
//! are only ever placed in a sandboxed `<iframe srcdoc>`, never inlined into
//! these pages.

use chrono::{DateTime, Utc};
use sitebuilder::{
    Route,
    domain::{Domain, Suggestion},
    editor::{AUTOSAVE_INTERVAL, Buffers},
    notify::{
        DASHBOARD_MESSAGE, EDITOR_MESSAGE, LOGIN_MESSAGE, Notification, SIGNUP_MESSAGE, Severity,
    },
    render::Frame,
    user::User,
};

/// Sandbox flags for frames showing site documents: scripts run, but in an
/// opaque origin with no access to this host or its cookies.
pub const FRAME_SANDBOX: &str = "allow-scripts";

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 1100px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    h2 {
        color: #555;
        margin-top: 30px;
    }
    nav a {
        margin-right: 15px;
        color: #0066cc;
        text-decoration: none;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    input[type="email"],
    input[type="password"],
    textarea {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    textarea {
        font-family: monospace;
        min-height: 360px;
        resize: vertical;
    }
    button, .btn {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
        text-decoration: none;
        display: inline-block;
    }
    button:hover, .btn:hover {
        background: #0052a3;
    }
    .btn-secondary, .logout-btn {
        background: #999;
    }
    .logout-btn {
        float: right;
    }
    table {
        width: 100%;
        border-collapse: collapse;
        margin: 20px 0;
    }
    th, td {
        text-align: left;
        padding: 12px;
        border-bottom: 1px solid #ddd;
    }
    th {
        background: #f0f0f0;
    }
    .message:empty {
        display: none;
    }
    .message {
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .message.error {
        color: #a94442;
        background: #f2dede;
    }
    .message.success {
        color: #3c763d;
        background: #dff0d8;
    }
    .message.info {
        color: #31708f;
        background: #d9edf7;
    }
    .domains-grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
        gap: 15px;
    }
    .domain-card, .domain-suggestion {
        border: 1px solid #ddd;
        border-radius: 6px;
        padding: 15px;
    }
    .domain-suggestion.taken {
        opacity: 0.6;
    }
    .domain-name {
        font-weight: bold;
        font-family: monospace;
    }
    .domain-meta {
        color: #666;
        font-size: 0.9em;
        margin: 8px 0;
    }
    .tab-btn.active {
        background: #333;
    }
    .editor-tab {
        display: none;
    }
    .editor-tab.active {
        display: block;
    }
    iframe.site-frame {
        width: 100%;
        min-height: 480px;
        border: 1px solid #ddd;
        border-radius: 4px;
        background: white;
    }
    #not-found {
        text-align: center;
        color: #666;
    }
"#;

/// Clears every message slot once its lifetime is over.
const MESSAGE_SCRIPT: &str = r#"
function showMessage(id, text, severity, ttl) {
    const el = document.getElementById(id);
    if (!el) return;
    el.textContent = text;
    el.className = 'message ' + severity;
    clearTimeout(el._timer);
    el._timer = setTimeout(() => { el.textContent = ''; el.className = 'message'; }, ttl);
}
document.querySelectorAll('.message[data-ttl]').forEach(el => {
    el._timer = setTimeout(() => { el.textContent = ''; el.className = 'message'; }, Number(el.dataset.ttl));
});
"#;

fn page(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Sitebuilder - {}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
{body}
    </div>
    <script>{MESSAGE_SCRIPT}{script}</script>
</body>
</html>"#,
        html_escape(title)
    )
}

/// The message slot `target`, filled with `message` while it is live.
pub fn message_slot(target: &str, message: Option<&Notification>, now: DateTime<Utc>) -> String {
    match message.filter(|m| !m.is_expired(now)) {
        Some(message) => format!(
            r#"<div id="{}" class="message {}" data-ttl="{}">{}</div>"#,
            html_escape(target),
            message.severity.as_str(),
            message.remaining(now).as_millis(),
            html_escape(&message.message)
        ),
        None => format!(r#"<div id="{}" class="message"></div>"#, html_escape(target)),
    }
}

fn nav(user: &User) -> String {
    format!(
        r#"<nav>
            <a href="{}">My domains</a>
            <a href="{}">Visit sites</a>
            <span style="color: #666;">{}</span>
            <form method="POST" action="/logout" style="display: inline;">
                <button type="submit" class="logout-btn">Logout</button>
            </form>
        </nav>"#,
        Route::Dashboard.path(),
        Route::View { domain: None }.path(),
        html_escape(&user.email)
    )
}

/// Render the login/signup page
///
/// The signup form is shown first when it has an error to display.
pub fn index_page(
    login_message: Option<&Notification>,
    signup_message: Option<&Notification>,
    now: DateTime<Utc>,
) -> String {
    let show_signup = signup_message.is_some_and(|m| m.severity == Severity::Error);
    let (login_display, signup_display) = if show_signup {
        ("none", "block")
    } else {
        ("block", "none")
    };

    let body = format!(
        r##"        <h1>Sitebuilder</h1>
        <div id="login-form" style="display: {login_display};">
            <h2>Login</h2>
            {}
            <form method="POST" action="/login">
                <div class="form-group">
                    <label for="login-email">Email:</label>
                    <input type="text" id="login-email" name="email" required autofocus>
                </div>
                <div class="form-group">
                    <label for="login-password">Password:</label>
                    <input type="password" id="login-password" name="password" required>
                </div>
                <button type="submit">Login</button>
            </form>
            <p>Don't have an account? <a href="#" class="toggle-auth">Sign up</a></p>
        </div>
        <div id="signup-form" style="display: {signup_display};">
            <h2>Create Account</h2>
            {}
            <form method="POST" action="/signup">
                <div class="form-group">
                    <label for="signup-name">Name:</label>
                    <input type="text" id="signup-name" name="name">
                </div>
                <div class="form-group">
                    <label for="signup-username">Username:</label>
                    <input type="text" id="signup-username" name="username">
                    <small style="color: #666;">Your email will be username@singla.com</small>
                </div>
                <div class="form-group">
                    <label for="signup-password">Password:</label>
                    <input type="password" id="signup-password" name="password">
                </div>
                <button type="submit">Sign up</button>
            </form>
            <p>Already have an account? <a href="#" class="toggle-auth">Login</a></p>
        </div>
        <p><a href="{}">Visit a site without an account</a></p>"##,
        message_slot(LOGIN_MESSAGE, login_message, now),
        message_slot(SIGNUP_MESSAGE, signup_message, now),
        Route::View { domain: None }.path(),
    );

    let script = r#"
document.querySelectorAll('.toggle-auth').forEach(link => link.addEventListener('click', e => {
    e.preventDefault();
    for (const id of ['login-form', 'signup-form']) {
        const el = document.getElementById(id);
        el.style.display = el.style.display === 'none' ? 'block' : 'none';
    }
}));
"#;

    page("Login", &body, script)
}

/// Everything the dashboard shows
pub struct DashboardView<'a> {
    pub user: &'a User,
    pub domains: &'a [Domain],
    pub query: Option<&'a str>,
    pub suggestions: &'a [Suggestion],
    pub message: Option<&'a Notification>,
    /// Set for the administrator only
    pub admin: Option<AdminPanel<'a>>,
}

/// Registry overview shown to the administrator
pub struct AdminPanel<'a> {
    pub users: &'a [User],
    pub domains: &'a [Domain],
}

fn domain_card(domain: &Domain) -> String {
    let updated = domain
        .updated_at
        .map(|at| format!("<br>Updated: {}", at.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        r#"<div class="domain-card">
                <div class="domain-name">{}</div>
                <div class="domain-meta">Created: {}{updated}</div>
                <div class="domain-actions">
                    <a href="{}" class="btn">Edit</a>
                    <a href="{}" class="btn btn-secondary" target="_blank">View</a>
                </div>
            </div>"#,
        html_escape(&domain.domain_name),
        domain.created_at.format("%Y-%m-%d"),
        html_escape(
            &Route::Editor {
                domain: domain.domain_name.clone()
            }
            .to_url()
        ),
        html_escape(
            &Route::View {
                domain: Some(domain.domain_name.clone())
            }
            .to_url()
        ),
    )
}

fn suggestion_row(suggestion: &Suggestion) -> String {
    if suggestion.available {
        format!(
            r#"<form method="POST" action="/dashboard/register" class="domain-suggestion">
                <input type="hidden" name="domain" value="{0}">
                <span class="domain-name">{0}</span>
                <span class="domain-status">Available</span>
                <button type="submit">Register</button>
            </form>"#,
            html_escape(&suggestion.domain_name)
        )
    } else {
        format!(
            r#"<div class="domain-suggestion taken">
                <span class="domain-name">{}</span>
                <span class="domain-status">Taken</span>
            </div>"#,
            html_escape(&suggestion.domain_name)
        )
    }
}

fn admin_panel(panel: &AdminPanel<'_>) -> String {
    let users: String = panel
        .users
        .iter()
        .map(|u| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&u.name),
                html_escape(&u.email),
                if u.is_admin() { "admin" } else { "standard" }
            )
        })
        .collect();
    let domains: String = panel
        .domains
        .iter()
        .map(|d| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&d.domain_name),
                html_escape(&d.owner_email),
                d.created_at.format("%Y-%m-%d")
            )
        })
        .collect();

    format!(
        r#"<div id="admin-panel">
            <h2>Admin Panel</h2>
            <table>
                <tr><th>Name</th><th>Email</th><th>Role</th></tr>
                {users}
            </table>
            <table>
                <tr><th>Domain</th><th>Owner</th><th>Created</th></tr>
                {domains}
            </table>
        </div>"#
    )
}

/// Render the dashboard page
pub fn dashboard_page(view: &DashboardView<'_>, now: DateTime<Utc>) -> String {
    let domains_html = if view.domains.is_empty() {
        "<p>You have no domains yet. Search for a domain to get started!</p>".to_string()
    } else {
        let cards: String = view.domains.iter().map(domain_card).collect();
        format!(r#"<div class="domains-grid">{cards}</div>"#)
    };

    let suggestions_html: String = view.suggestions.iter().map(suggestion_row).collect();

    let body = format!(
        r#"        {}
        <h1>Dashboard</h1>
        <p>Welcome, {}</p>
        {}
        <h2>Find a domain</h2>
        <form method="GET" action="{}">
            <div class="form-group">
                <input type="text" id="domain-search" name="q" value="{}" placeholder="mysite">
            </div>
            <button type="submit">Search</button>
        </form>
        <div id="domain-suggestions">{suggestions_html}</div>
        <h2>My domains</h2>
        <div id="domains-list">{domains_html}</div>
        {}"#,
        nav(view.user),
        html_escape(&view.user.name),
        message_slot(DASHBOARD_MESSAGE, view.message, now),
        Route::Dashboard.path(),
        html_escape(view.query.unwrap_or_default()),
        view.admin.as_ref().map(admin_panel).unwrap_or_default(),
    );

    page("Dashboard", &body, "")
}

/// Render the editor page
///
/// The three buffers are plain textareas. The browser autosaves them to
/// `/editor/draft` on a timer, asks `/editor/preview` for the composed
/// document, and posts them to `/editor/publish`.
pub fn editor_page(
    user: &User,
    domain: &str,
    buffers: &Buffers,
    preview: &str,
    now: DateTime<Utc>,
) -> String {
    let body = format!(
        r#"        {}
        <div class="editor-container">
        {}
        <h1>Editing <span id="current-domain">{}</span></h1>
        <div class="tabs">
            <button class="tab-btn active" data-tab="html">HTML</button>
            <button class="tab-btn" data-tab="css">CSS</button>
            <button class="tab-btn" data-tab="js">JavaScript</button>
            <button class="tab-btn" data-tab="preview">Preview</button>
            <button id="publish-btn" style="float: right;">Publish</button>
        </div>
        <div id="html-editor" class="editor-tab active"><textarea id="html-code" spellcheck="false">{}</textarea></div>
        <div id="css-editor" class="editor-tab"><textarea id="css-code" spellcheck="false">{}</textarea></div>
        <div id="js-editor" class="editor-tab"><textarea id="js-code" spellcheck="false">{}</textarea></div>
        <div id="preview-editor" class="editor-tab">
            <iframe id="preview" class="site-frame" sandbox="{FRAME_SANDBOX}" srcdoc="{}"></iframe>
        </div>
        </div>"#,
        nav(user),
        message_slot(EDITOR_MESSAGE, None, now),
        html_escape(domain),
        html_escape(buffers.html()),
        html_escape(buffers.css()),
        html_escape(buffers.js()),
        html_escape(preview),
    );

    let script = format!(
        r#"
const domain = {};
function buffers() {{
    return {{
        domain,
        html: document.getElementById('html-code').value,
        css: document.getElementById('css-code').value,
        js: document.getElementById('js-code').value,
    }};
}}
function post(path) {{
    return fetch(path, {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify(buffers()),
    }});
}}
async function updatePreview() {{
    const res = await post('/editor/preview');
    if (res.ok) document.getElementById('preview').srcdoc = (await res.json()).document;
}}
async function saveDraft() {{
    const res = await post('/editor/draft');
    if (!res.ok) showMessage('{EDITOR_MESSAGE}', (await res.json()).error, 'error', 5000);
}}
async function publishWebsite() {{
    const res = await post('/editor/publish');
    const body = await res.json();
    if (res.ok) showMessage('{EDITOR_MESSAGE}', body.message, body.severity, body.ttlMs);
    else showMessage('{EDITOR_MESSAGE}', body.error, 'error', 5000);
}}
function switchTab(name) {{
    document.querySelectorAll('.editor-tab').forEach(tab => tab.classList.remove('active'));
    document.querySelectorAll('.tab-btn').forEach(btn => btn.classList.remove('active'));
    document.getElementById(name + '-editor').classList.add('active');
    document.querySelector('.tab-btn[data-tab="' + name + '"]').classList.add('active');
    if (name === 'preview') updatePreview();
}}
document.querySelectorAll('.tab-btn').forEach(btn => btn.addEventListener('click', () => switchTab(btn.dataset.tab)));
document.getElementById('publish-btn').addEventListener('click', publishWebsite);
setInterval(saveDraft, {});
"#,
        js_string(domain),
        AUTOSAVE_INTERVAL.as_millis(),
    );

    page(&format!("Editing {domain}"), &body, &script)
}

/// Render the visit page
///
/// `query` is what was typed; `frame` is the result of rendering it.
pub fn view_page(user: Option<&User>, query: Option<&str>, frame: &Frame) -> String {
    let header = match user {
        Some(user) => nav(user),
        None => format!(r#"<nav><a href="{}">Login</a></nav>"#, Route::Index.path()),
    };

    let frame_html = match (&frame.document, frame.visible) {
        (Some(document), true) => format!(
            r#"<iframe id="site-frame" class="site-frame" sandbox="{FRAME_SANDBOX}" srcdoc="{}"></iframe>"#,
            html_escape(document)
        ),
        _ => String::new(),
    };
    let not_found_display = if frame.not_found { "block" } else { "none" };

    let body = format!(
        r#"        {header}
        <h1>Visit a site</h1>
        <form method="GET" action="{}">
            <div class="form-group">
                <input type="text" id="domain-input" name="domain" value="{}" placeholder="mysite.scom">
            </div>
            <button type="submit" id="visit-btn">Visit</button>
        </form>
        <div id="not-found" style="display: {not_found_display};">
            <h2>Domain not found</h2>
            <p>Nobody has published a site at this address yet.</p>
        </div>
        {frame_html}"#,
        Route::View { domain: None }.path(),
        html_escape(query.unwrap_or_default()),
    );

    let script = match &frame.location {
        Some(location) => format!(
            "history.replaceState({{}}, '', {});",
            js_string(&location.to_url())
        ),
        None => String::new(),
    };

    page("Visit", &body, &script)
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// A JavaScript string literal that is safe inside a `<script>` element.
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}
