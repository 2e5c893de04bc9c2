// Default values for the widget - these are the single source of truth for defaults

// DOM hooks
pub const DEFAULT_IMAGE_ID: &str = "draggable-item";
pub const DEFAULT_CONTAINER_ID: &str = "game-container";
pub const CONFIG_DATA_ATTRIBUTE: &str = "data-widget-config";
pub const PARTICLE_STYLES_ID: &str = "steam-particle-styles";

// Particle visuals
pub const DEFAULT_PARTICLE_ASSET: &str = "steam.png";
pub const DEFAULT_PARTICLE_CLASS: &str = "steam-particle";
pub const DEFAULT_PARTICLE_MIN_SIZE: f64 = 36.0;
pub const DEFAULT_PARTICLE_MAX_SIZE: f64 = 64.0;

// Particle timing (ms)
pub const DEFAULT_SPAWN_MIN_INTERVAL_MS: u32 = 150;
pub const DEFAULT_SPAWN_MAX_INTERVAL_MS: u32 = 350;
pub const DEFAULT_PARTICLE_ANIMATION_MS: u32 = 3000;
pub const DEFAULT_PARTICLE_REMOVAL_BUFFER_MS: u32 = 100; // removal waits for the fade to finish

// Placement
pub const DEFAULT_VERTICAL_SPAWN_OFFSET: f64 = 40.0;
