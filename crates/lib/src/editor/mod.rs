//! In-browser style editing of a domain's HTML, CSS and JavaScript.

pub mod buffers;
pub mod draft;
pub mod errors;
pub mod session;

pub use buffers::{BufferKind, Buffers};
pub use draft::{Draft, draft_key, load_draft, save_draft};
pub use errors::EditorError;
pub use session::{AUTOSAVE_INTERVAL, EditorSession, PUBLISHED_MESSAGE};
