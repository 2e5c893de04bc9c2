//! In-memory stand-ins for the page collaborators, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::models::{ObjectBounds, Particle, Point};
use crate::opacity::RasterError;
use crate::surface::{IDraggableImage, IGameContainer, ParticleRemover};

type RasterFn = Box<dyn Fn(u32, u32) -> Result<Vec<u8>, RasterError>>;

/// Image whose pixels are produced on demand at the requested size.
pub(crate) struct FakeImage {
    pub bounds: Cell<ObjectBounds>,
    /// Outer size when it differs from `bounds` (border/padding).
    pub layout: Cell<Option<(f64, f64)>>,
    pub ready: Cell<bool>,
    pub attached: Cell<bool>,
    pub moves: RefCell<Vec<Point>>,
    pub raster_calls: RefCell<Vec<(u32, u32)>>,
    raster: RasterFn,
}

impl FakeImage {
    pub fn new(bounds: ObjectBounds, raster: RasterFn) -> Rc<Self> {
        Rc::new(Self {
            bounds: Cell::new(bounds),
            layout: Cell::new(None),
            ready: Cell::new(true),
            attached: Cell::new(true),
            moves: RefCell::new(Vec::new()),
            raster_calls: RefCell::new(Vec::new()),
            raster,
        })
    }

    /// Opaque block covering the top-left quadrant at any size.
    pub fn quadrant(bounds: ObjectBounds) -> Rc<Self> {
        Self::new(
            bounds,
            Box::new(|w, h| Ok(crate::opacity::tests::quadrant_raster(w, h, w / 2, h / 2))),
        )
    }

    pub fn transparent(bounds: ObjectBounds) -> Rc<Self> {
        Self::new(bounds, Box::new(|w, h| Ok(vec![0u8; (w * h * 4) as usize])))
    }

    pub fn tainted(bounds: ObjectBounds) -> Rc<Self> {
        Self::new(
            bounds,
            Box::new(|_, _| Err(RasterError::ReadbackBlocked("SecurityError".into()))),
        )
    }

    pub fn resize(&self, width: f64, height: f64) {
        let mut bounds = self.bounds.get();
        bounds.width = width;
        bounds.height = height;
        self.bounds.set(bounds);
    }
}

impl IDraggableImage for FakeImage {
    fn bounds(&self) -> ObjectBounds {
        self.bounds.get()
    }

    fn layout_size(&self) -> (f64, f64) {
        let bounds = self.bounds.get();
        self.layout.get().unwrap_or((bounds.width, bounds.height))
    }

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn move_to(&self, top_left: Point) -> Result<(), JsValue> {
        self.moves.borrow_mut().push(top_left);
        let mut bounds = self.bounds.get();
        bounds.left = top_left.x;
        bounds.top = top_left.y;
        self.bounds.set(bounds);
        Ok(())
    }

    fn rasterize(&self, width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
        self.raster_calls.borrow_mut().push((width, height));
        (self.raster)(width, height)
    }
}

/// Container that records particle insertions and removals.
#[derive(Default)]
pub(crate) struct FakeContainer {
    pub origin: Cell<Point>,
    pub inserted: RefCell<Vec<Particle>>,
    pub live: Rc<Cell<usize>>,
}

impl FakeContainer {
    pub fn at(origin: Point) -> Rc<Self> {
        let container = Self::default();
        container.origin.set(origin);
        Rc::new(container)
    }
}

impl IGameContainer for FakeContainer {
    fn origin(&self) -> Point {
        self.origin.get()
    }

    fn attach_particle(&self, particle: &Particle) -> Result<ParticleRemover, JsValue> {
        self.inserted.borrow_mut().push(*particle);
        self.live.set(self.live.get() + 1);
        let live = self.live.clone();
        Ok(Box::new(move || live.set(live.get() - 1)))
    }
}

/// Resolve after `ms` of real browser time.
#[cfg(target_arch = "wasm32")]
pub(crate) async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}
