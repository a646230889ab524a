//! Document composition and display
//!
//! A site is three fragments. [`compose`] wraps them into one standalone
//! document: the CSS in a `<style>` block, the HTML as body content and the
//! JavaScript in a trailing `<script>`. Nothing is escaped or sanitized, so
//! a visited page runs whatever script its owner published. Hosts must put
//! the document in an isolated context (a sandboxed frame with an opaque
//! origin) rather than their own page.

use crate::{domain::Domain, route::Route};

/// Compose a standalone document from the three fragments, verbatim.
pub fn compose(html: &str, css: &str, js: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<style>{css}</style>\n</head>\n<body>\n{html}\n<script>{js}</script>\n</body>\n</html>\n"
    )
}

/// Like [`compose`], with a `<title>` in the head.
pub fn compose_titled(title: &str, html: &str, css: &str, js: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n{html}\n<script>{js}</script>\n</body>\n</html>\n"
    )
}

/// The document a visit to `domain` shows.
pub fn compose_domain(domain: &Domain) -> String {
    compose_titled(&domain.domain_name, &domain.html, &domain.css, &domain.js)
}

/// Where composed documents end up
///
/// Implemented by hosts: a frame element, a response body, a file.
pub trait DisplaySurface {
    /// Load `document` into the surface and make it visible.
    fn show_document(&mut self, document: String);

    /// Hide the surface.
    fn hide_document(&mut self);

    fn show_not_found(&mut self);

    fn hide_not_found(&mut self);

    /// Record the shareable location of what is displayed.
    fn set_location(&mut self, route: Route);
}

/// Show `domain` on `surface`, or the not-found indicator when there is none.
pub fn render(domain: Option<&Domain>, surface: &mut dyn DisplaySurface) {
    match domain {
        Some(domain) => {
            surface.show_document(compose_domain(domain));
            surface.hide_not_found();
            surface.set_location(Route::View {
                domain: Some(domain.domain_name.clone()),
            });
        }
        None => {
            surface.hide_document();
            surface.show_not_found();
        }
    }
}

/// Plain-state surface: what a host frame should look like after a render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub document: Option<String>,
    pub visible: bool,
    pub not_found: bool,
    pub location: Option<Route>,
}

impl DisplaySurface for Frame {
    fn show_document(&mut self, document: String) {
        self.document = Some(document);
        self.visible = true;
    }

    fn hide_document(&mut self) {
        self.visible = false;
    }

    fn show_not_found(&mut self) {
        self.not_found = true;
    }

    fn hide_not_found(&mut self) {
        self.not_found = false;
    }

    fn set_location(&mut self, route: Route) {
        self.location = Some(route);
    }
}
