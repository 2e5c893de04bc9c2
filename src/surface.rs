//! Collaborator seams between the widget logic and the page.
//!
//! The widget never touches `web_sys` directly; it talks to the draggable
//! image and the game container through these traits.  `dom` provides the
//! browser implementations, tests provide in-memory fakes.

use wasm_bindgen::JsValue;

use crate::models::{ObjectBounds, Particle, Point};
use crate::opacity::RasterError;

/// One-shot callback that takes a particle back out of the container.
pub type ParticleRemover = Box<dyn FnOnce()>;

/// The draggable image.
pub trait IDraggableImage {
    /// Displayed rectangle in container space.
    fn bounds(&self) -> ObjectBounds;

    /// Outer layout size, borders and padding included.  Dragging centers
    /// this box on the pointer.
    fn layout_size(&self) -> (f64, f64) {
        let bounds = self.bounds();
        (bounds.width, bounds.height)
    }

    /// `true` once the image has loaded and its dimensions are known.
    fn is_ready(&self) -> bool;

    /// `true` while the element is part of the document.
    fn is_attached(&self) -> bool;

    /// Write a new top-left position (container space).
    fn move_to(&self, top_left: Point) -> Result<(), JsValue>;

    /// Draw the image scaled to `width x height` and read back its RGBA
    /// bytes, row-major.
    fn rasterize(&self, width: u32, height: u32) -> Result<Vec<u8>, RasterError>;
}

/// The element hosting the image and its particles.
pub trait IGameContainer {
    /// Viewport position of the container's top-left corner.
    fn origin(&self) -> Point;

    /// Insert a particle element and hand back its remover.
    fn attach_particle(&self, particle: &Particle) -> Result<ParticleRemover, JsValue>;
}
