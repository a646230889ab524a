//! The three content buffers of an editing session.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::render::compose;

/// Which buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    Html,
    Css,
    Js,
}

impl BufferKind {
    pub const ALL: [BufferKind; 3] = [BufferKind::Html, BufferKind::Css, BufferKind::Js];

    pub fn as_str(&self) -> &'static str {
        match self {
            BufferKind::Html => "html",
            BufferKind::Css => "css",
            BufferKind::Js => "js",
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BufferKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(BufferKind::Html),
            "css" => Ok(BufferKind::Css),
            "js" | "javascript" => Ok(BufferKind::Js),
            other => Err(format!("unknown buffer '{other}'")),
        }
    }
}

/// Current text of the markup, style and script buffers
///
/// `revision` goes up on every change so a host can tell when its preview
/// is stale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffers {
    html: String,
    css: String,
    js: String,
    revision: u64,
}

impl Buffers {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
            revision: 0,
        }
    }

    pub fn get(&self, kind: BufferKind) -> &str {
        match kind {
            BufferKind::Html => &self.html,
            BufferKind::Css => &self.css,
            BufferKind::Js => &self.js,
        }
    }

    /// Replace one buffer. Returns whether the text changed.
    pub fn set(&mut self, kind: BufferKind, text: impl Into<String>) -> bool {
        let text = text.into();
        let slot = match kind {
            BufferKind::Html => &mut self.html,
            BufferKind::Css => &mut self.css,
            BufferKind::Js => &mut self.js,
        };
        if *slot == text {
            return false;
        }
        *slot = text;
        self.revision += 1;
        true
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn js(&self) -> &str {
        &self.js
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The preview document for the current text.
    pub fn compose(&self) -> String {
        compose(&self.html, &self.css, &self.js)
    }
}
