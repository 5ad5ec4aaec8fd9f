pub mod annotation;
pub mod color;
pub mod frame;
pub mod plot;

pub use annotation::{Annotation, PixelBox};
pub use frame::{draw_boxes_on_image, Frame};
