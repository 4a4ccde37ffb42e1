// Page element ids and interaction tuning for the browser front-end.
//
// Ids must match `index.html`.

// Canvas
pub const CANVAS_ID: &str = "viewer-canvas";

// Controls
pub const NIGHT_MODE_ID: &str = "night-mode";
pub const BASEMAP_TOGGLE_ID: &str = "basemap-toggle";
pub const BASEMAP_TYPE_ID: &str = "basemap-type";

// Info panel
pub const INFO_PANEL_ID: &str = "info-panel";
pub const INFO_TITLE_ID: &str = "info-title";
pub const INFO_ATTRIBUTES_ID: &str = "info-attributes";
pub const INFO_CLOSE_ID: &str = "info-close";

// Status overlays
pub const LOADING_ID: &str = "loading";
pub const BASEMAP_STATUS_ID: &str = "basemap-status";
pub const HIDDEN_CLASS: &str = "hidden";

pub const MODEL_ERROR_TEXT: &str = "Could not load the 3D model.";
pub const BASEMAP_ERROR_TEXT: &str = "Map tiles unavailable";

// Pointer
// A press that travels further than this (CSS px) before release is a drag, not a click.
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;
pub const MOUSE_BUTTON_PRIMARY: i16 = 0;
pub const MOUSE_BUTTON_SECONDARY: i16 = 2;

// Frame loop
// Long pauses (background tab) must not turn into one huge damping step.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
