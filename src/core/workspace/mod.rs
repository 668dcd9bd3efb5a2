// Capabilities the host application provides around an import: transient
// notices for the user and the canvas view a file can be dropped onto.

pub mod canvas_view;
pub mod notice_sink;

pub use canvas_view::{CanvasError, CanvasPoint, CanvasSize, CanvasView};
pub use notice_sink::NotificationSink;
