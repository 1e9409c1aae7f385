//! Application constants for plant proximity
//!
//! Default configuration values, the fixed inventory column layout, and
//! geodesy constants used throughout the crate.

// =============================================================================
// Geodesy
// =============================================================================

/// Mean Earth radius in meters used by the spherical haversine approximation
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// =============================================================================
// Selection and Refresh Defaults
// =============================================================================

/// Default search radius around the user's position, in meters
pub const DEFAULT_RADIUS_METERS: f64 = 100.0;

/// Default number of nearest records handed to the renderer
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Default minimum time between two inventory refreshes, in milliseconds
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 10_000;

/// Default column delimiter of the inventory file
pub const DEFAULT_DELIMITER: char = ',';

/// Default seed for the species colour palette
pub const DEFAULT_PALETTE_SEED: u64 = 0;

/// Upper bound on a single inventory fetch before it counts as failed
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Inventory Layout
// =============================================================================

/// Rows are padded with empty fields up to this many columns
pub const INVENTORY_COLUMN_COUNT: usize = 11;

/// Positional column indices of the plant inventory
///
/// Indices 3, 6 and 9 carry data the core does not use.
pub mod columns {
    pub const ID: usize = 0;
    pub const COMMON_NAME: usize = 1;
    pub const COMMON_NAME_ALT: usize = 2;
    pub const GENUS: usize = 4;
    pub const SPECIES: usize = 5;
    pub const LONGITUDE: usize = 7;
    pub const LATITUDE: usize = 8;
    pub const HEIGHT: usize = 10;
}

/// Placeholder used for blank common names and genera
pub const UNKNOWN_NAME: &str = "Unknown";

/// Height hint used when the height column is blank or unparsable
pub const DEFAULT_HEIGHT_METERS: f64 = 1.0;

// =============================================================================
// Colour Palette
// =============================================================================

/// Saturation of generated marker colours, in percent
pub const PALETTE_SATURATION: u8 = 70;

/// Lightness of generated marker colours, in percent
pub const PALETTE_LIGHTNESS: u8 = 60;

// =============================================================================
// Configuration Environment
// =============================================================================

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "PLANT_PROXIMITY_";

/// Application directory name under the user's config directory
pub const APP_DIR_NAME: &str = "plant-proximity";

/// Config file name inside the application directory
pub const CONFIG_FILE_NAME: &str = "config.json";
