use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs of the timeline layout. The vertical unit is one band row; the
/// de-collision distances are expressed in the same data units the labels
/// are placed in (axis units for date labels, days for group labels).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Offset of the first date label above the axis, in axis units.
    pub date_label_start_offset: f32,
    /// Minimum vertical gap between stacked date labels, in axis units.
    pub date_label_min_gap: f32,
    /// How far below a date label its leader line stops, in axis units.
    pub leader_gap: f32,
    /// Band height as a fraction of one row unit.
    pub band_height: f32,
    pub band_opacity: f32,
    /// Minimum horizontal gap between group labels, in days.
    pub group_label_min_gap_days: f32,
    /// Pixel height of one row unit.
    pub unit_height: f32,
    pub chart_width: f32,
    /// Margin added on each side of the date span, as a span fraction.
    pub margin_ratio: f32,
    pub tick_count: usize,
    pub marker_radius: f32,
    pub star_radius: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            date_label_start_offset: 0.2,
            date_label_min_gap: 0.6,
            leader_gap: 0.1,
            band_height: 0.8,
            band_opacity: 0.6,
            group_label_min_gap_days: 0.1,
            unit_height: 44.0,
            chart_width: 720.0,
            margin_ratio: 0.05,
            tick_count: 4,
            marker_radius: 5.0,
            star_radius: 9.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub label_line_height: f32,
    pub max_label_width_chars: usize,
    /// Skip font lookups and use the calibrated width table for ASCII text.
    pub fast_text_metrics: bool,
    pub timeline: TimelineConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_line_height: 1.5,
            max_label_width_chars: 22,
            fast_text_metrics: true,
            timeline: TimelineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    grid_color: Option<String>,
    contact_color: Option<String>,
    treatment_color: Option<String>,
    band_ramp_dark: Option<String>,
    band_ramp_light: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineConfigFile {
    date_label_start_offset: Option<f32>,
    date_label_min_gap: Option<f32>,
    leader_gap: Option<f32>,
    band_height: Option<f32>,
    band_opacity: Option<f32>,
    group_label_min_gap_days: Option<f32>,
    unit_height: Option<f32>,
    chart_width: Option<f32>,
    margin_ratio: Option<f32>,
    tick_count: Option<usize>,
    marker_radius: Option<f32>,
    star_radius: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    label_line_height: Option<f32>,
    max_label_width_chars: Option<usize>,
    fast_text_metrics: Option<bool>,
    timeline: Option<TimelineConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

/// Load a JSON (or JSON5) config file; a missing path means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(layout) = parsed.layout {
        apply_layout_file(&mut config.layout, layout);
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

/// Merge a parsed `%%{init}%%` directive over an existing config. Only the
/// `themeVariables` block is honored, mirroring the config file.
pub fn merge_init_config(mut config: Config, init: &serde_json::Value) -> Config {
    if let Some(theme_vars) = init.get("themeVariables") {
        if let Ok(vars) = serde_json::from_value::<ThemeVariables>(theme_vars.clone()) {
            apply_theme_variables(&mut config.theme, vars);
        }
    }
    config
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.line_color {
        theme.line_color = v;
    }
    if let Some(v) = vars.grid_color {
        theme.grid_color = v;
    }
    if let Some(v) = vars.contact_color {
        theme.contact_color = v;
    }
    if let Some(v) = vars.treatment_color {
        theme.treatment_color = v;
    }
    if let Some(v) = vars.band_ramp_dark {
        theme.band_ramp_dark = v;
    }
    if let Some(v) = vars.band_ramp_light {
        theme.band_ramp_light = v;
    }
}

fn apply_layout_file(layout: &mut LayoutConfig, file: LayoutConfigFile) {
    if let Some(v) = file.label_line_height {
        layout.label_line_height = v;
    }
    if let Some(v) = file.max_label_width_chars {
        layout.max_label_width_chars = v;
    }
    if let Some(v) = file.fast_text_metrics {
        layout.fast_text_metrics = v;
    }
    if let Some(file) = file.timeline {
        let tl = &mut layout.timeline;
        if let Some(v) = file.date_label_start_offset {
            tl.date_label_start_offset = v;
        }
        if let Some(v) = file.date_label_min_gap {
            tl.date_label_min_gap = v;
        }
        if let Some(v) = file.leader_gap {
            tl.leader_gap = v;
        }
        if let Some(v) = file.band_height {
            tl.band_height = v;
        }
        if let Some(v) = file.band_opacity {
            tl.band_opacity = v;
        }
        if let Some(v) = file.group_label_min_gap_days {
            tl.group_label_min_gap_days = v;
        }
        if let Some(v) = file.unit_height {
            tl.unit_height = v;
        }
        if let Some(v) = file.chart_width {
            tl.chart_width = v;
        }
        if let Some(v) = file.margin_ratio {
            tl.margin_ratio = v;
        }
        if let Some(v) = file.tick_count {
            tl.tick_count = v;
        }
        if let Some(v) = file.marker_radius {
            tl.marker_radius = v;
        }
        if let Some(v) = file.star_radius {
            tl.star_radius = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.timeline.date_label_min_gap, 0.6);
        assert_eq!(config.layout.timeline.group_label_min_gap_days, 0.1);
    }

    #[test]
    fn init_directive_overrides_theme_variables() {
        let init: serde_json::Value = serde_json::json!({
            "themeVariables": { "fontSize": 18.0, "contactColor": "#123456" }
        });
        let config = merge_init_config(Config::default(), &init);
        assert_eq!(config.theme.font_size, 18.0);
        assert_eq!(config.theme.contact_color, "#123456");
        // Untouched fields keep their defaults.
        assert_eq!(config.theme.treatment_color, Theme::classic().treatment_color);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = std::env::temp_dir().join("frise-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{
                "theme": "modern",
                "themeVariables": { "fontFamily": "DejaVu Sans" },
                "layout": { "timeline": { "dateLabelMinGap": 0.8, "tickCount": 6 } },
                "render": { "width": 640 }
            }"#,
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.theme.font_family, "DejaVu Sans");
        assert_eq!(config.theme.font_size, Theme::modern().font_size);
        assert_eq!(config.layout.timeline.date_label_min_gap, 0.8);
        assert_eq!(config.layout.timeline.tick_count, 6);
        assert_eq!(config.render.width, 640.0);
    }

    #[test]
    fn json5_config_is_accepted() {
        let dir = std::env::temp_dir().join("frise-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json5");
        std::fs::write(
            &path,
            "{ layout: { timeline: { /* lighter bands */ bandOpacity: 0.4 } } }",
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout.timeline.band_opacity, 0.4);
    }
}
