pub mod image;
pub mod webui;

pub use image::*;
pub use webui::*;
