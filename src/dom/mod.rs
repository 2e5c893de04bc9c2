//! Browser implementations of the collaborator traits in `surface`.

pub mod container;
pub mod image;
pub mod styles;

pub use container::DomGameContainer;
pub use image::DomDraggableImage;
