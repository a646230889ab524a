//! Page routes
//!
//! The app has four pages. Editor and view pages carry the domain they are
//! about as a `domain` query parameter, so their URLs can be bookmarked and
//! shared.

use url::form_urlencoded;

use crate::session::Session;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login and signup
    Index,
    /// The user's domains and domain search
    Dashboard,
    /// Code editor for one domain
    Editor { domain: String },
    /// Visit page, optionally already pointed at a domain
    View { domain: Option<String> },
}

impl Route {
    /// Fixed route name.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Index => "index",
            Route::Dashboard => "dashboard",
            Route::Editor { .. } => "editor",
            Route::View { .. } => "view",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Dashboard => "/dashboard",
            Route::Editor { .. } => "/editor",
            Route::View { .. } => "/view",
        }
    }

    pub fn domain(&self) -> Option<&str> {
        match self {
            Route::Editor { domain } => Some(domain),
            Route::View { domain } => domain.as_deref(),
            Route::Index | Route::Dashboard => None,
        }
    }

    /// Path plus the percent-encoded `domain` parameter, if any.
    pub fn to_url(&self) -> String {
        match self.domain() {
            Some(domain) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("domain", domain)
                    .finish();
                format!("{}?{query}", self.path())
            }
            None => self.path().to_string(),
        }
    }

    /// Where a request for this route should actually land.
    ///
    /// Logged-in users skip the login page; anonymous users may only see the
    /// login page and the visit page.
    pub fn guard(self, session: &Session) -> Route {
        match (session.is_authenticated(), self) {
            (true, Route::Index) => Route::Dashboard,
            (false, route @ (Route::Index | Route::View { .. })) => route,
            (false, _) => Route::Index,
            (true, route) => route,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_url())
    }
}
