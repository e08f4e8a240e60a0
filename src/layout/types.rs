use crate::ir::Category;

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Marker for one punctual event, sitting on the axis baseline.
#[derive(Debug, Clone)]
pub struct MomentLayout {
    pub x: f32,
    pub y: f32,
    pub category: Category,
}

/// A date label stacked above the axis, with its leader line back down to
/// the marker. `bottom_y` is the lower edge of the text block; the leader
/// runs from the axis up to `leader_top_y`, stopping just short of the text.
#[derive(Debug, Clone)]
pub struct DateLabelLayout {
    pub text: TextBlock,
    pub x: f32,
    pub bottom_y: f32,
    pub leader_top_y: f32,
    /// Adjusted vertical offset in axis units, before pixel mapping.
    pub offset: f32,
}

/// One drawn rectangle of an interval group's band.
#[derive(Debug, Clone)]
pub struct IntervalBandLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
    pub group: usize,
}

/// The legend label of an interval group, centered on the group's extent.
#[derive(Debug, Clone)]
pub struct GroupLabelLayout {
    pub text: TextBlock,
    pub x: f32,
    pub y: f32,
    pub group: usize,
}

#[derive(Debug, Clone)]
pub struct AxisTick {
    pub x: f32,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub title: Option<TextBlock>,
    pub title_y: f32,
    pub axis_y: f32,
    pub axis_start_x: f32,
    pub axis_end_x: f32,
    /// Vertical extent the dashed tick rules span.
    pub rules_top_y: f32,
    pub rules_bottom_y: f32,
    pub tick_label_y: f32,
    pub moments: Vec<MomentLayout>,
    pub date_labels: Vec<DateLabelLayout>,
    pub bands: Vec<IntervalBandLayout>,
    pub group_labels: Vec<GroupLabelLayout>,
    pub ticks: Vec<AxisTick>,
    pub width: f32,
    pub height: f32,
}
