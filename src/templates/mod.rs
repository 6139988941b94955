//! HTML templates and styling for the video notes page.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `scripts` - player and editor glue for the browser
//! - `components` - base template, escaping, shared widgets
//! - `page` - the interactive page

mod components;
mod page;
mod scripts;
mod styles;

pub use components::{base_html, html_escape, post_button, sanitize_markup};
pub use page::{render_page, PageView};
pub use styles::STYLE;
