mod color;
mod rect;

pub use color::{hsv_to_rgb, Color};
pub use rect::{Rect, Size};
