pub mod canvas;
pub mod surface;

pub use canvas::{Canvas, DrawOp, Rgba};
pub use surface::SurfacePresenter;
