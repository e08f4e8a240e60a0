use crate::date::CivilDate;
use crate::ir::{Category, Event, Timeline};
use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%").unwrap());
static SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<start>[\d./-]+)\s*->\s*(?P<end>[\d./-]+)\s*:\s*(?P<legend>.+)$").unwrap()
});

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub timeline: Timeline,
    pub init_config: Option<serde_json::Value>,
}

/// Parse a `frise` source into a timeline document.
///
/// The format is line oriented: a `frise` (or `timeline`) header, an
/// optional `title`, then one event per line. Punctual dates are
/// `DATE : category : legend` or `DATE : legend`; ranges are
/// `DATE -> DATE : legend`. Dates are day-first `DD-MM-YYYY`.
pub fn parse_frise(input: &str) -> Result<ParseOutput> {
    let (lines, init_config) = preprocess_input(input);

    let mut timeline = Timeline::new();
    let mut saw_header = false;

    for (line_no, line) in lines {
        let lower = line.to_ascii_lowercase();
        if !saw_header {
            if lower.starts_with("frise") || lower.starts_with("timeline") {
                saw_header = true;
                continue;
            }
            bail!("line {line_no}: expected 'frise' header, found '{line}'");
        }
        if lower.starts_with("title") {
            let rest = line.get(5..).unwrap_or("").trim();
            if !rest.is_empty() {
                timeline.title = Some(strip_quotes(rest));
            }
            continue;
        }

        timeline.events.push(parse_event_line(&line, line_no)?);
    }

    if !saw_header {
        bail!("no 'frise' header found in input");
    }

    Ok(ParseOutput {
        timeline,
        init_config,
    })
}

fn parse_event_line(line: &str, line_no: usize) -> Result<Event> {
    if let Some(caps) = SPAN_RE.captures(line) {
        let start = parse_date(&caps["start"], line_no)?;
        let end = parse_date(&caps["end"], line_no)?;
        if end < start {
            bail!("line {line_no}: range ends before it starts ({start} -> {end})");
        }
        return Ok(Event::Span {
            start,
            end,
            legend: strip_quotes(caps["legend"].trim()),
        });
    }

    let Some(colon_idx) = line.find(':') else {
        bail!("line {line_no}: expected 'DATE : legend' or 'DATE -> DATE : legend', found '{line}'");
    };
    let date = parse_date(&line[..colon_idx], line_no)?;
    let rest = line[colon_idx + 1..].trim();
    if rest.is_empty() {
        bail!("line {line_no}: missing legend after date");
    }

    // A leading `category :` segment is optional; an unrecognized first
    // segment belongs to the legend (legends may contain colons).
    if let Some((head, tail)) = rest.split_once(':') {
        if let Some(category) = Category::from_token(head) {
            let legend = tail.trim();
            if legend.is_empty() {
                bail!("line {line_no}: missing legend after category");
            }
            return Ok(Event::Moment {
                date,
                category,
                legend: strip_quotes(legend),
            });
        }
    }

    Ok(Event::Moment {
        date,
        category: Category::default(),
        legend: strip_quotes(rest),
    })
}

fn parse_date(text: &str, line_no: usize) -> Result<CivilDate> {
    let text = text.trim();
    match CivilDate::parse_day_first(text) {
        Some(date) => Ok(date),
        None => bail!("line {line_no}: invalid date '{text}' (expected day-first DD-MM-YYYY)"),
    }
}

/// Strip blank lines and `%%` comments, extract the `%%{init}%%` directive.
/// Line numbers refer to the original input for error reporting.
fn preprocess_input(input: &str) -> (Vec<(usize, String)>, Option<serde_json::Value>) {
    let mut init_config: Option<serde_json::Value> = None;
    let mut lines = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(caps) = INIT_RE.captures(trimmed) {
            if let Some(json_str) = caps.get(1).map(|m| m.as_str()) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else if let Ok(value) = json5::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                }
            }
            continue;
        }
        if trimmed.starts_with("%%") {
            continue;
        }
        let without_comment = strip_trailing_comment(trimmed);
        if without_comment.is_empty() {
            continue;
        }
        lines.push((idx + 1, without_comment));
    }

    (lines, init_config)
}

fn strip_trailing_comment(line: &str) -> String {
    match line.find("%%") {
        Some(idx) => line[..idx].trim_end().to_string(),
        None => line.to_string(),
    }
}

fn strip_quotes(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
