pub mod logging;
pub mod render;
