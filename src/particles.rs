//! Steam particle emitter.
//!
//! Particles start just above the visible silhouette of the image: the
//! horizontal position comes from a random opaque column, the vertical one
//! from the topmost opaque row.  Without opacity data both fall back to the
//! image rectangle.  A particle is never tracked after insertion; its removal
//! timer owns the only handle to it.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::WidgetConfig;
use crate::models::{ObjectBounds, Particle};
use crate::opacity::OpacityData;
use crate::surface::{IDraggableImage, IGameContainer};
use crate::timer::ITimerHost;
use crate::{debug_log, warn_log};

/// Placement and lifetime knobs, extracted from [`WidgetConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSettings {
    pub size_range: [f64; 2],
    pub vertical_offset: f64,
    pub lifetime_ms: u32,
}

impl From<&WidgetConfig> for ParticleSettings {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            size_range: config.particle_size_range,
            vertical_offset: config.vertical_spawn_offset,
            lifetime_ms: config.particle_lifetime_ms(),
        }
    }
}

/// Compute size and container-space position of a new particle.
pub fn place_particle<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &ObjectBounds,
    opacity: &OpacityData,
    settings: &ParticleSettings,
) -> Particle {
    let [min_size, max_size] = settings.size_range;
    let size = rng.gen_range(min_size..=max_size);
    let map = opacity.map();

    let column_x = map.and_then(|map| {
        let column = *map.visible_columns().choose(&mut *rng)?;
        let scale_x = bounds.width / map.width() as f64;
        Some(column as f64 * scale_x)
    });
    let x = match column_x {
        Some(x) => x,
        None if bounds.width > 0.0 => rng.gen_range(0.0..bounds.width),
        None => 0.0,
    };

    let row_y = map.and_then(|map| {
        let row = map.top_visible_row()?;
        let scale_y = bounds.height / map.height() as f64;
        Some(row as f64 * scale_y)
    });
    let y = row_y.unwrap_or(0.0);

    Particle {
        left: bounds.left + x - size / 2.0,
        top: bounds.top + y - settings.vertical_offset,
        size,
    }
}

pub struct ParticleEmitter {
    image: Rc<dyn IDraggableImage>,
    container: Rc<dyn IGameContainer>,
    timer: Rc<dyn ITimerHost>,
    settings: ParticleSettings,
    rng: RefCell<StdRng>,
}

impl ParticleEmitter {
    pub fn new(
        image: Rc<dyn IDraggableImage>,
        container: Rc<dyn IGameContainer>,
        timer: Rc<dyn ITimerHost>,
        settings: ParticleSettings,
        rng: StdRng,
    ) -> Self {
        Self {
            image,
            container,
            timer,
            settings,
            rng: RefCell::new(rng),
        }
    }

    /// Insert one particle and schedule its removal.  Returns the particle,
    /// or `None` when the image has left the document or insertion failed.
    pub fn spawn(&self, opacity: &OpacityData) -> Option<Particle> {
        if !self.image.is_attached() {
            debug_log!("image detached, skipping particle spawn");
            return None;
        }

        let bounds = self.image.bounds();
        let particle = place_particle(&mut *self.rng.borrow_mut(), &bounds, opacity, &self.settings);

        match self.container.attach_particle(&particle) {
            Ok(remove) => {
                // Removal must not depend on the widget outliving the particle.
                self.timer.set_detached_timeout(self.settings.lifetime_ms, remove);
                Some(particle)
            }
            Err(err) => {
                warn_log!("failed to insert particle: {:?}", err);
                None
            }
        }
    }
}
