use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable snapshot of a computed layout, for debugging and for
/// inspecting label placement without reading SVG.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub axis_y: f32,
    pub title: Option<Vec<String>>,
    pub moments: Vec<MomentDump>,
    pub date_labels: Vec<DateLabelDump>,
    pub bands: Vec<BandDump>,
    pub group_labels: Vec<GroupLabelDump>,
    pub ticks: Vec<TickDump>,
}

#[derive(Debug, Serialize)]
pub struct MomentDump {
    pub x: f32,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct DateLabelDump {
    pub x: f32,
    pub bottom_y: f32,
    pub offset: f32,
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BandDump {
    pub group: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct GroupLabelDump {
    pub group: usize,
    pub x: f32,
    pub y: f32,
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TickDump {
    pub x: f32,
    pub label: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        LayoutDump {
            width: layout.width,
            height: layout.height,
            axis_y: layout.axis_y,
            title: layout.title.as_ref().map(|t| t.lines.clone()),
            moments: layout
                .moments
                .iter()
                .map(|m| MomentDump {
                    x: m.x,
                    category: format!("{:?}", m.category),
                })
                .collect(),
            date_labels: layout
                .date_labels
                .iter()
                .map(|label| DateLabelDump {
                    x: label.x,
                    bottom_y: label.bottom_y,
                    offset: label.offset,
                    lines: label.text.lines.clone(),
                })
                .collect(),
            bands: layout
                .bands
                .iter()
                .map(|band| BandDump {
                    group: band.group,
                    x: band.x,
                    y: band.y,
                    width: band.width,
                    height: band.height,
                    color: band.color.clone(),
                })
                .collect(),
            group_labels: layout
                .group_labels
                .iter()
                .map(|label| GroupLabelDump {
                    group: label.group,
                    x: label.x,
                    y: label.y,
                    lines: label.text.lines.clone(),
                })
                .collect(),
            ticks: layout
                .ticks
                .iter()
                .map(|tick| TickDump {
                    x: tick.x,
                    label: tick.label.clone(),
                })
                .collect(),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::parser::parse_frise;
    use crate::theme::Theme;

    #[test]
    fn dump_mirrors_the_layout() {
        let parsed = parse_frise(
            "frise\n14-02-2024 : contact : Visit\n01-03-2024 -> 15-04-2024 : Chemo\n",
        )
        .unwrap();
        let layout =
            compute_layout(&parsed.timeline, &Theme::classic(), &LayoutConfig::default()).unwrap();
        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.moments.len(), 1);
        assert_eq!(dump.moments[0].category, "Contact");
        assert_eq!(dump.bands.len(), 1);
        assert_eq!(dump.date_labels[0].lines.len(), 2);

        let json = serde_json::to_string(&dump).unwrap();
        assert!(json.contains("\"ticks\""));
        assert!(json.contains("Chemo"));
    }
}
