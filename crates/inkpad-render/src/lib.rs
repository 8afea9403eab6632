//! inkpad renderer
//!
//! Pure display-list renderer for the exam drawing canvas: converts the
//! element sequence, the in-flight preview and the camera into an ordered
//! list of draw commands for whatever surface the host draws on.

mod color;
mod display;

pub use color::parse_hex_color;
pub use display::{build_display_list, DrawCmd};
