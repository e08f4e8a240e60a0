//! Row-based form state for interactive front-ends.
//!
//! A front-end owns one `FormSession` per user session, mutates it on
//! explicit user actions (editing a row, adding a row) and calls `submit`
//! to turn the raw field text into a validated [`Timeline`]. The session
//! itself never touches global state and dies with its owner.

use crate::date::CivilDate;
use crate::ir::{Category, Event, Timeline};
use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowKind {
    #[default]
    Moment,
    Span,
}

/// One form row, holding field text exactly as entered. `end_date` is only
/// meaningful for `RowKind::Span`, `category` only for `RowKind::Moment`.
#[derive(Debug, Clone, Default)]
pub struct FormRow {
    pub kind: RowKind,
    pub date: String,
    pub end_date: String,
    pub category: String,
    pub legend: String,
}

impl FormRow {
    fn is_blank(&self) -> bool {
        self.date.trim().is_empty()
            && self.end_date.trim().is_empty()
            && self.legend.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    pub title: Option<String>,
    pub rows: Vec<FormRow>,
}

/// Rows shown on first page load.
const INITIAL_ROWS: usize = 4;

impl FormSession {
    pub fn new() -> Self {
        Self {
            title: None,
            rows: vec![FormRow::default(); INITIAL_ROWS],
        }
    }

    /// Append one empty row (the "add a row" action).
    pub fn add_row(&mut self) -> &mut FormRow {
        self.rows.push(FormRow::default());
        self.rows.last_mut().unwrap()
    }

    /// Validate every non-blank row and build the timeline document.
    /// Fails on the first invalid row, identified by its 1-based number.
    pub fn submit(&self) -> Result<Timeline> {
        let mut timeline = Timeline {
            title: self.title.clone(),
            events: Vec::new(),
        };

        for (idx, row) in self.rows.iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            timeline.events.push(parse_row(row, idx + 1)?);
        }

        Ok(timeline)
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_row(row: &FormRow, row_no: usize) -> Result<Event> {
    let date = parse_row_date(&row.date, "date", row_no)?;
    let legend = row.legend.trim().to_string();

    match row.kind {
        RowKind::Moment => {
            let category = match row.category.trim() {
                "" => Category::default(),
                token => match Category::from_token(token) {
                    Some(category) => category,
                    None => bail!("row {row_no}: unknown category '{token}'"),
                },
            };
            Ok(Event::Moment {
                date,
                category,
                legend,
            })
        }
        RowKind::Span => {
            let end = parse_row_date(&row.end_date, "end date", row_no)?;
            if end < date {
                bail!("row {row_no}: range ends before it starts ({date} -> {end})");
            }
            Ok(Event::Span {
                start: date,
                end,
                legend,
            })
        }
    }
}

fn parse_row_date(text: &str, field: &str, row_no: usize) -> Result<CivilDate> {
    match CivilDate::parse_day_first(text) {
        Some(date) => Ok(date),
        None => bail!(
            "row {row_no}: invalid {field} '{}' (expected day-first DD-MM-YYYY)",
            text.trim()
        ),
    }
}
