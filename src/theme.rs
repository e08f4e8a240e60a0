use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    /// Axis baseline and label leader lines.
    pub line_color: String,
    /// Dashed vertical rules under the axis ticks.
    pub grid_color: String,
    pub contact_color: String,
    pub treatment_color: String,
    /// Endpoints of the interval-band color ramp, dark to light.
    pub band_ramp_dark: String,
    pub band_ramp_light: String,
}

impl Theme {
    /// Look of the original matplotlib output: Arial, red contact dots,
    /// orange treatment stars, dark-to-yellow band ramp.
    pub fn classic() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            text_color: "#222222".to_string(),
            line_color: "#000000".to_string(),
            grid_color: "#BBBBBB".to_string(),
            contact_color: "#FF0000".to_string(),
            treatment_color: "#FFA500".to_string(),
            band_ramp_dark: "hsl(227, 48%, 23%)".to_string(),
            band_ramp_light: "hsl(62, 68%, 71%)".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            grid_color: "#D7E0F0".to_string(),
            contact_color: "#E0484E".to_string(),
            treatment_color: "#F59E0B".to_string(),
            band_ramp_dark: "hsl(221, 42%, 30%)".to_string(),
            band_ramp_light: "hsl(58, 60%, 74%)".to_string(),
        }
    }

    /// One band color per interval group, sampled across the ramp in group
    /// order. A single group gets the dark end.
    pub fn band_palette(&self, groups: usize) -> Vec<String> {
        if groups == 0 {
            return Vec::new();
        }
        let dark = parse_color_to_hsl(&self.band_ramp_dark).unwrap_or((227.0, 48.0, 23.0));
        let light = parse_color_to_hsl(&self.band_ramp_light).unwrap_or((62.0, 68.0, 71.0));
        (0..groups)
            .map(|idx| {
                let t = if groups <= 1 {
                    0.0
                } else {
                    idx as f32 / (groups - 1) as f32
                };
                hsl_color(
                    dark.0 + (light.0 - dark.0) * t,
                    dark.1 + (light.1 - dark.1) * t,
                    dark.2 + (light.2 - dark.2) * t,
                )
            })
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

pub fn hsl_color(h: f32, s: f32, l: f32) -> String {
    format!("hsl({:.1}, {:.1}%, {:.1}%)", h, s, l)
}

/// Parse `#rrggbb`, `#rgb` or `hsl(h, s%, l%)` into hsl components.
pub fn parse_color_to_hsl(color: &str) -> Option<(f32, f32, f32)> {
    let color = color.trim();
    if let Some(body) = color
        .strip_prefix("hsl(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = body.split(',').collect();
        if parts.len() != 3 {
            return None;
        }
        let h: f32 = parts[0].trim().parse().ok()?;
        let s: f32 = parts[1].trim().trim_end_matches('%').parse().ok()?;
        let l: f32 = parts[2].trim().trim_end_matches('%').parse().ok()?;
        return Some((h, s, l));
    }

    let hex = color.strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let parse = |idx: usize| {
                u8::from_str_radix(&hex[idx..idx + 1], 16)
                    .ok()
                    .map(|v| (v * 17) as f32 / 255.0)
            };
            (parse(0)?, parse(1)?, parse(2)?)
        }
        6 => {
            let parse = |idx: usize| {
                u8::from_str_radix(&hex[idx..idx + 2], 16)
                    .ok()
                    .map(|v| v as f32 / 255.0)
            };
            (parse(0)?, parse(2)?, parse(4)?)
        }
        _ => return None,
    };

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < f32::EPSILON {
        return Some((0.0, 0.0, l * 100.0));
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if (max - r).abs() < f32::EPSILON {
        ((g - b) / d).rem_euclid(6.0)
    } else if (max - g).abs() < f32::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Some((h * 60.0, s * 100.0, l * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_round_to_hsl() {
        let (h, s, l) = parse_color_to_hsl("#FF0000").unwrap();
        assert!((h - 0.0).abs() < 0.5);
        assert!((s - 100.0).abs() < 0.5);
        assert!((l - 50.0).abs() < 0.5);

        let (_, s, l) = parse_color_to_hsl("#FFFFFF").unwrap();
        assert_eq!(s, 0.0);
        assert!((l - 100.0).abs() < 0.5);

        assert!(parse_color_to_hsl("#F00").is_some());
        assert!(parse_color_to_hsl("red").is_none());
    }

    #[test]
    fn hsl_strings_parse_back() {
        let (h, s, l) = parse_color_to_hsl("hsl(227, 48%, 23%)").unwrap();
        assert_eq!((h, s, l), (227.0, 48.0, 23.0));
    }

    #[test]
    fn band_palette_spans_the_ramp() {
        let theme = Theme::classic();
        assert!(theme.band_palette(0).is_empty());

        let single = theme.band_palette(1);
        assert_eq!(single, vec!["hsl(227.0, 48.0%, 23.0%)".to_string()]);

        let five = theme.band_palette(5);
        assert_eq!(five.len(), 5);
        let unique: std::collections::HashSet<&String> = five.iter().collect();
        assert_eq!(unique.len(), 5, "all band colors distinct: {five:?}");
        assert_eq!(five[0], "hsl(227.0, 48.0%, 23.0%)");
        assert_eq!(five[4], "hsl(62.0, 68.0%, 71.0%)");
    }
}
