//! Static files served alongside the rendered pages.

pub const STYLE_PATH: &str = "/static/style.css";
pub const STEP_SCRIPT_PATH: &str = "/static/step.js";

pub const STYLE_CSS: &str = include_str!("../assets/style.css");
pub const STEP_JS: &str = include_str!("../assets/step.js");
