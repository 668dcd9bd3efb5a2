pub mod json_canvas;

pub use json_canvas::JsonCanvas;
