use crate::date::CivilDate;

/// Marker category for a punctual event. The two categories carry distinct
/// markers on the rendered axis: contacts are round dots, treatments are
/// star markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Contact,
    Treatment,
}

impl Category {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "contact" => Some(Self::Contact),
            "treatment" | "traitement" => Some(Self::Treatment),
            _ => None,
        }
    }
}

/// One timeline entry. Punctual dates and date ranges carry different
/// fields, so they are distinct variants rather than one row type with
/// optional slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Moment {
        date: CivilDate,
        category: Category,
        legend: String,
    },
    Span {
        start: CivilDate,
        end: CivilDate,
        legend: String,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Moment<'a> {
    pub date: CivilDate,
    pub category: Category,
    pub legend: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    pub start: CivilDate,
    pub end: CivilDate,
    pub legend: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub title: Option<String>,
    pub events: Vec<Event>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Punctual events in input order.
    pub fn moments(&self) -> Vec<Moment<'_>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Moment {
                    date,
                    category,
                    legend,
                } => Some(Moment {
                    date: *date,
                    category: *category,
                    legend,
                }),
                Event::Span { .. } => None,
            })
            .collect()
    }

    /// Range events in input order.
    pub fn spans(&self) -> Vec<Span<'_>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Span { start, end, legend } => Some(Span {
                    start: *start,
                    end: *end,
                    legend,
                }),
                Event::Moment { .. } => None,
            })
            .collect()
    }

    /// Earliest and latest date across all events, when any exist.
    pub fn date_extent(&self) -> Option<(CivilDate, CivilDate)> {
        let mut extent: Option<(CivilDate, CivilDate)> = None;
        let mut widen = |date: CivilDate| {
            extent = Some(match extent {
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
                None => (date, date),
            });
        };
        for event in &self.events {
            match event {
                Event::Moment { date, .. } => widen(*date),
                Event::Span { start, end, .. } => {
                    widen(*start);
                    widen(*end);
                }
            }
        }
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: i32) -> CivilDate {
        CivilDate::from_days(value)
    }

    #[test]
    fn category_tokens_parse_case_insensitively() {
        assert_eq!(Category::from_token("Contact"), Some(Category::Contact));
        assert_eq!(Category::from_token("TREATMENT"), Some(Category::Treatment));
        assert_eq!(Category::from_token("traitement"), Some(Category::Treatment));
        assert_eq!(Category::from_token("visit"), None);
    }

    #[test]
    fn accessors_preserve_input_order() {
        let timeline = Timeline {
            title: None,
            events: vec![
                Event::Span {
                    start: day(10),
                    end: day(20),
                    legend: "physio".into(),
                },
                Event::Moment {
                    date: day(5),
                    category: Category::Contact,
                    legend: "first call".into(),
                },
                Event::Moment {
                    date: day(1),
                    category: Category::Treatment,
                    legend: "injection".into(),
                },
            ],
        };
        let moments = timeline.moments();
        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].legend, "first call");
        assert_eq!(moments[1].legend, "injection");
        assert_eq!(timeline.spans().len(), 1);
    }

    #[test]
    fn date_extent_spans_all_events() {
        let timeline = Timeline {
            title: None,
            events: vec![
                Event::Moment {
                    date: day(7),
                    category: Category::Contact,
                    legend: String::new(),
                },
                Event::Span {
                    start: day(-3),
                    end: day(12),
                    legend: "rehab".into(),
                },
            ],
        };
        let (lo, hi) = timeline.date_extent().unwrap();
        assert_eq!(lo, day(-3));
        assert_eq!(hi, day(12));
        assert!(Timeline::new().date_extent().is_none());
    }
}
