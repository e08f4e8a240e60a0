#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod date;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod session;
pub mod theme;
pub(crate) mod text_metrics;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use layout::compute_layout;
pub use parser::parse_frise;
pub use render::render_svg;
pub use theme::Theme;
