use super::*;

/// Vertical geometry is computed in axis units first (1 unit = one band
/// row), then mapped to pixels: markers at 0, date labels climbing above,
/// band i dropping to -(i + 1). This mirrors the data-space layout the
/// diagram is defined in.
pub(super) fn compute_timeline_layout(
    timeline: &Timeline,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let tl = &config.timeline;
    let (min_date, max_date) = timeline.date_extent().ok_or(LayoutError::EmptyTimeline)?;

    let padding = theme.font_size * 1.25;
    let unit = tl.unit_height;

    let title = timeline
        .title
        .as_ref()
        .map(|t| measure_label(t, theme, config));
    let title_height = title.as_ref().map(|t| t.height + padding).unwrap_or(0.0);

    // Horizontal projection with a margin on both sides of the date span.
    let min_days = min_date.days() as f32;
    let span_days = ((max_date.days() - min_date.days()).max(1)) as f32;
    let margin_days = span_days * tl.margin_ratio;
    let chart_x = padding;
    let scale = tl.chart_width / (span_days + 2.0 * margin_days);
    let x_of = |days: f32| chart_x + (days - min_days + margin_days) * scale;

    // Date labels are stacked in chronological order; every label starts at
    // the same offset and the adjuster spreads the collisions upward.
    let mut moments = timeline.moments();
    moments.sort_by_key(|moment| moment.date);
    let desired: Vec<f32> = vec![tl.date_label_start_offset; moments.len()];
    let offsets = adjust_positions(&desired, tl.date_label_min_gap)?;

    let label_blocks: Vec<TextBlock> = moments
        .iter()
        .map(|moment| {
            let text = if moment.legend.is_empty() {
                moment.date.to_string()
            } else {
                format!("{}\n{}", moment.date, moment.legend)
            };
            measure_label(&text, theme, config)
        })
        .collect();

    let top_stack = offsets
        .iter()
        .zip(&label_blocks)
        .map(|(offset, block)| offset * unit + block.height)
        .fold(unit * 0.5, f32::max);

    let axis_y = padding + title_height + top_stack;

    // Interval groups keep first-seen order; each group is one band row.
    let spans = timeline.spans();
    let mut groups: Vec<(String, Vec<Span<'_>>)> = Vec::new();
    for span in &spans {
        match groups
            .iter_mut()
            .find(|(legend, _)| legend.as_str() == span.legend)
        {
            Some((_, members)) => members.push(*span),
            None => groups.push((span.legend.to_string(), vec![*span])),
        }
    }
    let palette = theme.band_palette(groups.len());

    let band_top_offset = 1.0 - tl.band_height;
    let mut bands = Vec::new();
    let mut pending_labels: Vec<(f32, usize)> = Vec::new();
    for (group, (_, members)) in groups.iter().enumerate() {
        let y = axis_y + (group as f32 + band_top_offset) * unit;
        let mut group_start = f32::MAX;
        let mut group_end = f32::MIN;
        for span in members {
            let start = span.start.days() as f32;
            let end = span.end.days() as f32;
            group_start = group_start.min(start);
            group_end = group_end.max(end);
            bands.push(IntervalBandLayout {
                x: x_of(start),
                y,
                width: ((end - start) * scale).max(2.0),
                height: tl.band_height * unit,
                color: palette[group % palette.len()].clone(),
                group,
            });
        }
        pending_labels.push((group_start + (group_end - group_start) / 2.0, group));
    }

    // Group labels spread left to right along the axis day scale.
    pending_labels.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let centers: Vec<f32> = pending_labels.iter().map(|(center, _)| *center).collect();
    let adjusted_centers = adjust_positions(&centers, tl.group_label_min_gap_days)?;

    let mut group_labels = Vec::new();
    for ((_, group), center) in pending_labels.iter().zip(&adjusted_centers) {
        let (legend, _) = &groups[*group];
        group_labels.push(GroupLabelLayout {
            text: measure_label(legend, theme, config),
            x: x_of(*center),
            y: axis_y + (*group as f32 + 1.0 - tl.band_height / 2.0) * unit,
            group: *group,
        });
    }

    let moment_layouts: Vec<MomentLayout> = moments
        .iter()
        .map(|moment| MomentLayout {
            x: x_of(moment.date.days() as f32),
            y: axis_y,
            category: moment.category,
        })
        .collect();

    let date_labels: Vec<DateLabelLayout> = moments
        .iter()
        .zip(label_blocks)
        .zip(&offsets)
        .map(|((moment, text), offset)| DateLabelLayout {
            text,
            x: x_of(moment.date.days() as f32),
            bottom_y: axis_y - offset * unit,
            leader_top_y: axis_y - (offset - tl.leader_gap) * unit,
            offset: *offset,
        })
        .collect();

    let bands_bottom = axis_y + (groups.len() as f32).max(0.5) * unit;
    let tick_label_y = bands_bottom + theme.font_size * 1.4;

    let mut ticks = Vec::new();
    for i in 0..=tl.tick_count {
        let day = min_days + span_days * (i as f32) / (tl.tick_count as f32).max(1.0);
        ticks.push(AxisTick {
            x: x_of(day),
            label: CivilDate::from_days(day.round() as i32).to_string(),
        });
    }

    Ok(Layout {
        title,
        title_y: padding + theme.font_size,
        axis_y,
        axis_start_x: chart_x,
        axis_end_x: chart_x + tl.chart_width,
        rules_top_y: padding + title_height,
        rules_bottom_y: bands_bottom,
        tick_label_y,
        moments: moment_layouts,
        date_labels,
        bands,
        group_labels,
        ticks,
        width: tl.chart_width + padding * 2.0,
        height: tick_label_y + theme.font_size * 0.5 + padding,
    })
}
