//! quizsmith-report — Text and HTML rendering of graded attempts.

pub mod html;
pub mod text;

pub use html::{generate_html, write_html_report};
pub use text::{render_text, write_text_report};
