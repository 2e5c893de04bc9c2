//! DOM event wiring for a mounted widget.
//!
//! Every listener closure is kept in a [`ListenerSet`]; dropping the set
//! detaches the listeners again, so unmounting leaves no handlers behind.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent, PageTransitionEvent, Window};

use crate::models::Point;
use crate::widget::Widget;
use crate::{debug_log, warn_log};

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Listeners owned by one mounted widget.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref());
        }
    }
}

fn client_point(event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(mouse.client_x() as f64, mouse.client_y() as f64))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Attach all handlers the widget needs.
pub fn attach_widget_listeners(
    window: &Window,
    image: &HtmlElement,
    container: &HtmlElement,
    widget: Rc<Widget>,
) -> Result<ListenerSet, JsValue> {
    let mut set = ListenerSet::new();

    // Pixel-accurate toggle.  A toggling click must not reach any other
    // container click handler.
    {
        let widget = widget.clone();
        set.listen(container, "click", move |event: Event| {
            if let Some(client) = client_point(&event) {
                let result = widget.handle_click(client);
                if result.toggled {
                    event.stop_immediate_propagation();
                }
            }
        })?;
    }

    {
        let widget = widget.clone();
        set.listen(container, "mousemove", move |event: Event| {
            if let Some(client) = client_point(&event) {
                if let Err(e) = widget.handle_pointer_move(client) {
                    warn_log!("failed to move draggable item: {:?}", e);
                }
            }
        })?;
    }

    // The browser's native image drag would fight the custom one.
    set.listen(image, "dragstart", |event: Event| event.prevent_default())?;

    {
        let widget = widget.clone();
        set.listen(image, "load", move |_event: Event| {
            debug_log!("draggable image loaded");
            widget.rebuild_opacity();
        })?;
    }

    {
        let widget = widget.clone();
        set.listen(window, "resize", move |_event: Event| {
            widget.rebuild_opacity();
        })?;
    }

    {
        let widget = widget.clone();
        set.listen(window, "pagehide", move |_event: Event| {
            widget.stop_emitting();
        })?;
    }

    // Back/forward cache restore: the page comes back without a fresh load.
    set.listen(window, "pageshow", move |event: Event| {
        let restored = event
            .dyn_ref::<PageTransitionEvent>()
            .map_or(false, PageTransitionEvent::persisted);
        if restored {
            debug_log!("page restored from cache, resuming steam");
            widget.start_emitting();
        }
    })?;

    Ok(set)
}
