mod error;
pub(crate) mod placement;
mod text;
mod timeline;
pub(crate) mod types;

pub use error::LayoutError;
pub use placement::adjust_positions;
pub use types::*;

use text::*;
use timeline::*;

use crate::config::LayoutConfig;
use crate::date::CivilDate;
use crate::ir::{Span, Timeline};
use crate::theme::Theme;

/// Compute the full pixel geometry for one timeline document.
pub fn compute_layout(
    timeline: &Timeline,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    compute_timeline_layout(timeline, theme, config)
}
