//! Serve command - runs the sitebuilder web host.

use std::path::PathBuf;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};

use sitebuilder::{
    Error, Instance, Route, Session,
    editor::{BufferKind, EditorSession},
    notify::{
        DASHBOARD_MESSAGE, FORM_MESSAGE_TTL, LOGIN_MESSAGE, Notification, SIGNUP_MESSAGE,
        SIGNUP_SUCCESS_MESSAGE, Severity,
    },
    render::{Frame, compose},
    user::User,
};

use crate::backend::{Profile, save_instance};
use crate::cli::ServeArgs;
use crate::session::{SessionStore, SessionToken};
use crate::templates::{self, AdminPanel, DashboardView};

const SESSION_COOKIE: &str = "sitebuilder_session";

/// Shared application state
#[derive(Clone)]
struct AppState {
    instance: Instance,
    sessions: SessionStore,
}

impl AppState {
    /// The token of a live session named by the visitor's cookie.
    async fn visitor(&self, cookies: &Cookies) -> Option<SessionToken> {
        let cookie = cookies.get(SESSION_COOKIE)?;
        self.sessions
            .contains(cookie.value())
            .await
            .then(|| cookie.value().to_string())
    }

    /// The visitor's session; anonymous without a live cookie.
    async fn session(&self, cookies: &Cookies) -> (Option<SessionToken>, Session) {
        let token = self.visitor(cookies).await;
        let session = match &token {
            Some(token) => self.sessions.session(token).await,
            None => Session::anonymous(),
        };
        (token, session)
    }

    /// The visitor's token, starting a session and setting the cookie if needed.
    async fn ensure_visitor(&self, cookies: &Cookies) -> SessionToken {
        if let Some(token) = self.visitor(cookies).await {
            return token;
        }

        let token = self.sessions.create_session().await;
        let mut cookie = Cookie::new(SESSION_COOKIE, token.clone());
        cookie.set_http_only(true);
        cookie.set_path("/");
        cookies.add(cookie);
        token
    }

    /// The live message for `target`, if the visitor has a session.
    async fn message(&self, token: Option<&str>, target: &str) -> Option<Notification> {
        match token {
            Some(token) => self.sessions.message(token, target).await,
            None => None,
        }
    }

    /// Queue a form message for the visitor's next page.
    async fn flash(&self, cookies: &Cookies, severity: Severity, target: &str, message: String) {
        let token = self.ensure_visitor(cookies).await;
        let notification = Notification::new(
            severity,
            target,
            message,
            self.instance.clock().now(),
            FORM_MESSAGE_TTL,
        );
        self.sessions.notify(&token, notification).await;
    }
}

/// Login form data
#[derive(Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

/// Signup form data
#[derive(Deserialize)]
struct SignupForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Domain registration form data
#[derive(Deserialize)]
struct RegisterForm {
    domain: String,
}

/// Query parameters naming a domain
#[derive(Deserialize)]
struct DomainQuery {
    domain: Option<String>,
}

/// Query parameters for the dashboard search
#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Buffer snapshot posted by the editor page
#[derive(Deserialize)]
struct BufferPayload {
    domain: String,
    #[serde(default)]
    html: String,
    #[serde(default)]
    css: String,
    #[serde(default)]
    js: String,
}

/// Run the sitebuilder web host
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let instance = profile.instance().clone();
    let store_path = profile.path().to_path_buf();
    tracing::info!("Using profile at {}", store_path.display());

    let app_state = AppState {
        sessions: SessionStore::new(instance.clock().clone()),
        instance,
    };

    let app = router(app_state.clone());

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    // Print startup message
    println!("Sitebuilder started: http://localhost:{}", local_addr.port());
    println!();
    println!("Available endpoints:");
    println!("  GET  /                 - Login and signup");
    println!("  GET  /dashboard        - Your domains and domain search (requires login)");
    println!("  GET  /editor?domain=   - Code editor (requires login, owner only)");
    println!("  GET  /view?domain=     - Visit a published site");
    println!("  GET  /health           - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown(app_state.instance.clone(), store_path))
        .await?;

    println!("Server shut down");
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health_endpoint))
        .route("/login", post(handle_login_submit))
        .route("/signup", post(handle_signup_submit))
        .route("/logout", post(handle_logout))
        .route("/dashboard", get(handle_dashboard))
        .route("/dashboard/register", post(handle_register_domain))
        .route("/editor", get(handle_editor))
        .route("/editor/draft", post(handle_save_draft))
        .route("/editor/preview", post(handle_preview))
        .route("/editor/publish", post(handle_publish))
        .route("/view", get(handle_view))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

/// Wait for SIGINT or SIGTERM, then save the profile.
async fn shutdown(instance: Instance, store_path: PathBuf) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
    }

    match save_instance(&instance, &store_path) {
        Ok(()) => {
            tracing::info!("Profile saved to {}", store_path.display());
            println!("\nProfile saved successfully");
        }
        Err(e) => {
            tracing::error!("Failed to save profile: {e}");
            eprintln!("Failed to save profile: {e}");
        }
    }
}

/// Map a core error onto a status code for the JSON endpoints.
fn error_status(err: &Error) -> StatusCode {
    if err.is_authentication_error() {
        StatusCode::UNAUTHORIZED
    } else if err.is_permission_denied() {
        StatusCode::FORBIDDEN
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_conflict() {
        StatusCode::CONFLICT
    } else if err.is_validation_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn json_error(err: &Error) -> Response {
    let status = error_status(err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {err}");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    tracing::error!("Request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

/// Redirect when `route` is guarded away from for this session.
fn guard(route: Route, session: &Session) -> Option<Redirect> {
    let landed = route.clone().guard(session);
    (landed != route).then(|| Redirect::to(&landed.to_url()))
}

// ============================================================================
// Authentication Handlers
// ============================================================================

/// Handler for GET / - Login and signup page
async fn handle_index(State(state): State<AppState>, cookies: Cookies) -> Response {
    let (token, session) = state.session(&cookies).await;
    if let Some(redirect) = guard(Route::Index, &session) {
        return redirect.into_response();
    }

    let login = state.message(token.as_deref(), LOGIN_MESSAGE).await;
    let signup = state.message(token.as_deref(), SIGNUP_MESSAGE).await;
    Html(templates::index_page(
        login.as_ref(),
        signup.as_ref(),
        state.instance.clock().now(),
    ))
    .into_response()
}

/// Handler for POST /login - Process login
async fn handle_login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Response {
    // Password verification is CPU-bound
    let instance = state.instance.clone();
    let result =
        tokio::task::spawn_blocking(move || instance.authenticate(&form.email, &form.password))
            .await;

    match result {
        Ok(Ok(user)) => {
            tracing::info!(email = %user.email, "Logged in");
            let token = state.ensure_visitor(&cookies).await;
            state.sessions.login(&token, user).await;
            Redirect::to(&Route::Dashboard.to_url()).into_response()
        }
        Ok(Err(e)) => {
            state
                .flash(&cookies, Severity::Error, LOGIN_MESSAGE, e.to_string())
                .await;
            Redirect::to(&Route::Index.to_url()).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// Handler for POST /signup - Create an account, then go back to the login form
async fn handle_signup_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SignupForm>,
) -> Response {
    let instance = state.instance.clone();
    let result = tokio::task::spawn_blocking(move || {
        instance.signup(&form.name, &form.username, &form.password)
    })
    .await;

    match result {
        Ok(Ok(_)) => {
            state
                .flash(
                    &cookies,
                    Severity::Success,
                    SIGNUP_MESSAGE,
                    SIGNUP_SUCCESS_MESSAGE.to_string(),
                )
                .await;
        }
        Ok(Err(e)) => {
            if error_status(&e) == StatusCode::INTERNAL_SERVER_ERROR {
                return internal_error(e);
            }
            state
                .flash(&cookies, Severity::Error, SIGNUP_MESSAGE, e.to_string())
                .await;
        }
        Err(e) => return internal_error(e),
    }
    Redirect::to(&Route::Index.to_url()).into_response()
}

/// Handler for POST /logout - Forget the logged-in user
async fn handle_logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.sessions.destroy_session(cookie.value()).await;
        let mut expired = Cookie::from(SESSION_COOKIE);
        expired.set_path("/");
        cookies.remove(expired);
    }
    Redirect::to(&Route::Index.to_url())
}

// ============================================================================
// Dashboard Handlers
// ============================================================================

/// Handler for GET /dashboard - The user's domains and domain search
async fn handle_dashboard(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<SearchQuery>,
) -> Response {
    let (token, session) = state.session(&cookies).await;
    if let Some(redirect) = guard(Route::Dashboard, &session) {
        return redirect.into_response();
    }
    let Some(user) = session.user() else {
        return Redirect::to(&Route::Index.to_url()).into_response();
    };

    let query = query.q.filter(|q| !q.trim().is_empty());
    let message = state.message(token.as_deref(), DASHBOARD_MESSAGE).await;
    match dashboard_html(&state.instance, &session, user, query.as_deref(), message.as_ref()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

fn dashboard_html(
    instance: &Instance,
    session: &Session,
    user: &User,
    query: Option<&str>,
    message: Option<&Notification>,
) -> sitebuilder::Result<String> {
    let domains = instance.my_domains(session)?;
    let suggestions = match query {
        Some(q) => instance.suggest(session, q)?,
        None => Vec::new(),
    };
    let (all_users, all_domains) = if session.is_admin() {
        (instance.directory().list()?, instance.registry().list()?)
    } else {
        (Vec::new(), Vec::new())
    };
    let view = DashboardView {
        user,
        domains: &domains,
        query,
        suggestions: &suggestions,
        message,
        admin: session.is_admin().then(|| AdminPanel {
            users: &all_users,
            domains: &all_domains,
        }),
    };
    Ok(templates::dashboard_page(&view, instance.clock().now()))
}

/// Handler for POST /dashboard/register - Claim a suggested domain
async fn handle_register_domain(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RegisterForm>,
) -> Response {
    let (_, session) = state.session(&cookies).await;
    if !session.is_authenticated() {
        return Redirect::to(&Route::Index.to_url()).into_response();
    }

    match state.instance.register_domain(&session, &form.domain) {
        Ok(domain) => Redirect::to(
            &Route::Editor {
                domain: domain.domain_name,
            }
            .to_url(),
        )
        .into_response(),
        Err(e) if error_status(&e) != StatusCode::INTERNAL_SERVER_ERROR => {
            state
                .flash(&cookies, Severity::Error, DASHBOARD_MESSAGE, e.to_string())
                .await;
            Redirect::to(&Route::Dashboard.to_url()).into_response()
        }
        Err(e) => internal_error(e),
    }
}

// ============================================================================
// Editor Handlers
// ============================================================================

/// Handler for GET /editor?domain=... - Code editor for one domain
async fn handle_editor(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<DomainQuery>,
) -> Response {
    let (_, session) = state.session(&cookies).await;
    let Some(domain) = query.domain.filter(|d| !d.is_empty()) else {
        return Redirect::to(&Route::Dashboard.guard(&session).to_url()).into_response();
    };
    if let Some(redirect) = guard(
        Route::Editor {
            domain: domain.clone(),
        },
        &session,
    ) {
        return redirect.into_response();
    }
    let Some(user) = session.user() else {
        return Redirect::to(&Route::Index.to_url()).into_response();
    };

    match state.instance.open_editor(&session, &domain) {
        Ok(editor) => {
            let Some(buffers) = editor.buffers() else {
                return Redirect::to(&Route::Dashboard.to_url()).into_response();
            };
            let preview = buffers.compose();
            Html(templates::editor_page(
                user,
                editor.domain(),
                buffers,
                &preview,
                state.instance.clock().now(),
            ))
            .into_response()
        }
        Err(e) if error_status(&e) != StatusCode::INTERNAL_SERVER_ERROR => {
            state
                .flash(&cookies, Severity::Error, DASHBOARD_MESSAGE, e.to_string())
                .await;
            Redirect::to(&Route::Dashboard.to_url()).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// Open an editor for the posted snapshot with its buffers replaced.
async fn editor_for(
    state: &AppState,
    cookies: &Cookies,
    payload: BufferPayload,
) -> Result<EditorSession, Error> {
    let (_, session) = state.session(cookies).await;
    let mut editor = state.instance.open_editor(&session, &payload.domain)?;
    editor.set_buffer(BufferKind::Html, payload.html);
    editor.set_buffer(BufferKind::Css, payload.css);
    editor.set_buffer(BufferKind::Js, payload.js);
    Ok(editor)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftResponse {
    saved_at: Option<String>,
}

/// Handler for POST /editor/draft - Autosave the posted buffers
async fn handle_save_draft(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<BufferPayload>,
) -> Response {
    let saved = match editor_for(&state, &cookies, payload).await {
        Ok(editor) => editor.autosave(),
        Err(e) => Err(e),
    };
    match saved {
        Ok(draft) => Json(DraftResponse {
            saved_at: draft.map(|d| d.saved_at.to_rfc3339()),
        })
        .into_response(),
        Err(e) => json_error(&e),
    }
}

#[derive(Serialize)]
struct PreviewResponse {
    document: String,
}

/// Handler for POST /editor/preview - Compose the posted buffers
async fn handle_preview(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<BufferPayload>,
) -> Response {
    let (_, session) = state.session(&cookies).await;
    if let Err(e) = session.require_user() {
        return json_error(&e);
    }
    Json(PreviewResponse {
        document: compose(&payload.html, &payload.css, &payload.js),
    })
    .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(flatten)]
    notification: Notification,
    ttl_ms: u128,
}

/// Handler for POST /editor/publish - Publish the posted buffers
async fn handle_publish(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<BufferPayload>,
) -> Response {
    let published = match editor_for(&state, &cookies, payload).await {
        Ok(editor) => editor.publish(),
        Err(e) => Err(e),
    };
    match published {
        Ok(Some(notification)) => {
            let ttl_ms = notification
                .remaining(state.instance.clock().now())
                .as_millis();
            Json(PublishResponse {
                notification,
                ttl_ms,
            })
            .into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => json_error(&e),
    }
}

// ============================================================================
// Visit and Health Handlers
// ============================================================================

/// Handler for GET /view?domain=... - Visit a published site
async fn handle_view(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<DomainQuery>,
) -> Response {
    let (_, session) = state.session(&cookies).await;

    let mut frame = Frame::default();
    let typed = query.domain.filter(|d| !d.trim().is_empty());
    if let Some(raw) = &typed
        && let Err(e) = state.instance.visit(raw, &mut frame)
    {
        return internal_error(e);
    }

    Html(templates::view_page(
        session.user(),
        typed.as_deref(),
        &frame,
    ))
    .into_response()
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    users: usize,
    domains: usize,
    sessions: usize,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> Response {
    let counts = state
        .instance
        .directory()
        .list()
        .and_then(|users| Ok((users.len(), state.instance.registry().list()?.len())));
    match counts {
        Ok((users, domains)) => Json(HealthResponse {
            status: "healthy",
            users,
            domains,
            sessions: state.sessions.session_count().await,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}
