//! The owning controller of one draggable bowl.
//!
//! A `Widget` holds everything that used to be page-global: the drag state,
//! the current opacity data, the particle emitter and the spawn scheduler.
//! Collaborators are injected, so the whole interaction can be exercised
//! without a browser.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsValue;

use crate::config::WidgetConfig;
use crate::debug_log;
use crate::drag::{ClickResult, DragController, DragState};
use crate::hit_test;
use crate::models::{Particle, Point};
use crate::opacity::{self, OpacityData};
use crate::particles::{ParticleEmitter, ParticleSettings};
use crate::scheduler::SpawnScheduler;
use crate::surface::{IDraggableImage, IGameContainer};
use crate::timer::ITimerHost;

pub struct Widget {
    inner: Rc<WidgetInner>,
    scheduler: SpawnScheduler,
}

struct WidgetInner {
    image: Rc<dyn IDraggableImage>,
    container: Rc<dyn IGameContainer>,
    drag: RefCell<DragController>,
    opacity: RefCell<OpacityData>,
    emitter: ParticleEmitter,
}

impl WidgetInner {
    fn spawn(&self) -> Option<Particle> {
        let opacity = self.opacity.borrow();
        self.emitter.spawn(&opacity)
    }
}

impl Widget {
    /// Build the controller.  If the image is already loaded its opacity map
    /// is computed right away.
    pub fn new(
        image: Rc<dyn IDraggableImage>,
        container: Rc<dyn IGameContainer>,
        timer: Rc<dyn ITimerHost>,
        config: &WidgetConfig,
        mut rng: StdRng,
    ) -> Self {
        let emitter_rng = StdRng::seed_from_u64(rng.gen());
        let emitter = ParticleEmitter::new(
            image.clone(),
            container.clone(),
            timer.clone(),
            ParticleSettings::from(config),
            emitter_rng,
        );
        let inner = Rc::new(WidgetInner {
            image,
            container,
            drag: RefCell::new(DragController::new()),
            opacity: RefCell::new(OpacityData::default()),
            emitter,
        });

        let weak = Rc::downgrade(&inner);
        let scheduler = SpawnScheduler::new(
            timer,
            config.spawn_interval_range_ms,
            rng,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.spawn();
                }
            }),
        );

        let widget = Self { inner, scheduler };
        if widget.inner.image.is_ready() {
            widget.rebuild_opacity();
        }
        widget
    }

    /// Recompute the opacity map at the image's current displayed size.
    /// Returns `true` when pixel data is available.
    pub fn rebuild_opacity(&self) -> bool {
        let data = opacity::rebuild(self.inner.image.as_ref());
        let available = data.is_available();
        *self.inner.opacity.borrow_mut() = data;
        available
    }

    pub fn opacity(&self) -> Ref<'_, OpacityData> {
        self.inner.opacity.borrow()
    }

    /// Classify a click at viewport coordinates and update the drag state.
    pub fn handle_click(&self, client: Point) -> ClickResult {
        let origin = self.inner.container.origin();
        let bounds = self.inner.image.bounds();
        let outcome = {
            let opacity = self.inner.opacity.borrow();
            hit_test::classify(client, origin, &bounds, &opacity)
        };
        let result = self.inner.drag.borrow_mut().apply(outcome);
        debug_log!("click {:?} -> {:?}, drag {:?}", client, outcome, self.drag_state());
        result
    }

    /// Follow the pointer while dragging.  Returns `Ok(true)` when the image
    /// was moved.
    pub fn handle_pointer_move(&self, client: Point) -> Result<bool, JsValue> {
        let pointer = client.relative_to(self.inner.container.origin());
        let size = self.inner.image.layout_size();
        let target = self.inner.drag.borrow().follow(pointer, size);
        match target {
            Some(top_left) => {
                self.inner.image.move_to(top_left)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.inner.drag.borrow().state()
    }

    /// Spawn a single particle outside the regular schedule.
    pub fn spawn_particle(&self) -> Option<Particle> {
        self.inner.spawn()
    }

    pub fn start_emitting(&self) {
        self.scheduler.start();
    }

    pub fn stop_emitting(&self) {
        self.scheduler.stop();
    }

    pub fn is_emitting(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Stop the spawn loop and release any drag in progress.
    pub fn teardown(&self) {
        self.scheduler.stop();
        self.inner.drag.borrow_mut().release();
    }
}
