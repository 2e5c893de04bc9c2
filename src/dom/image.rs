//! `<img>` adapter with its offscreen hit-test canvas.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use crate::dom_utils::{js_error_message, set_position};
use crate::models::{ObjectBounds, Point};
use crate::opacity::RasterError;
use crate::surface::IDraggableImage;

pub struct DomDraggableImage {
    element: HtmlImageElement,
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
}

impl DomDraggableImage {
    /// Wrap `element` and allocate the (detached) canvas used for readback.
    pub fn new(document: &Document, element: HtmlImageElement) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let context = canvas
            .get_context("2d")?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        Ok(Self { element, canvas, context })
    }

    pub fn element(&self) -> &HtmlImageElement {
        &self.element
    }
}

impl IDraggableImage for DomDraggableImage {
    fn bounds(&self) -> ObjectBounds {
        ObjectBounds::new(
            self.element.offset_left() as f64,
            self.element.offset_top() as f64,
            self.element.client_width() as f64,
            self.element.client_height() as f64,
        )
    }

    fn layout_size(&self) -> (f64, f64) {
        (self.element.offset_width() as f64, self.element.offset_height() as f64)
    }

    fn is_ready(&self) -> bool {
        // A broken image is `complete` too, but has no natural size.
        self.element.complete() && self.element.natural_width() > 0
    }

    fn is_attached(&self) -> bool {
        self.element.is_connected()
    }

    fn move_to(&self, top_left: Point) -> Result<(), JsValue> {
        set_position(&self.element, top_left.x, top_left.y)
    }

    fn rasterize(&self, width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
        let ctx = self.context.as_ref().ok_or(RasterError::ContextUnavailable)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let (w, h) = (width as f64, height as f64);

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.draw_image_with_html_image_element_and_dw_and_dh(&self.element, 0.0, 0.0, w, h)
            .map_err(|e| RasterError::DrawFailed(js_error_message(&e)))?;
        let pixels = ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| RasterError::ReadbackBlocked(js_error_message(&e)))?;
        Ok(pixels.data().0)
    }
}
