//! Plain geometry and entity types shared by the widget components.
//!
//! Three coordinate spaces are in play:
//! * **viewport** – `MouseEvent.clientX/clientY`
//! * **container** – relative to the game container's top-left corner
//! * **raster** – pixel indices into the offscreen opacity buffer

/// A point in viewport or container space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate into the space whose origin is `origin`.
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Displayed rectangle of the draggable image in container space
/// (`offsetLeft`, `offsetTop`, `clientWidth`, `clientHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ObjectBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Size of the offscreen raster for this rectangle; never zero.
    pub fn raster_size(&self) -> (u32, u32) {
        (Self::raster_extent(self.width), Self::raster_extent(self.height))
    }

    fn raster_extent(len: f64) -> u32 {
        if len.is_finite() && len >= 1.0 {
            len.floor() as u32
        } else {
            1
        }
    }
}

/// A transient steam particle, positioned in container space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub left: f64,
    pub top: f64,
    pub size: f64,
}
