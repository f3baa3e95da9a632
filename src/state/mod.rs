pub mod hover;
pub mod touch;
pub mod viewport;

pub use hover::{HoverState, LabelHitTest};
pub use touch::touch_points;
pub use viewport::{ViewAction, ViewState, ViewportConfig, ZoomDirection};
