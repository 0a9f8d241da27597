use archive_core::{ArchiveError, Result};
use archive_vector::VectorDocMeta;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Relative and absolute date ranges recognized by the filter layer.
/// `past_3_months`/`past_3months` both parse to `Past3Months`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DateRange {
    PastWeek,
    PastMonth,
    Past3Months,
    PastYear,
    Decade1990s,
    Decade2000s,
    Decade2010s,
    Decade2020s,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "past_week" => Ok(DateRange::PastWeek),
            "past_month" => Ok(DateRange::PastMonth),
            "past_3_months" | "past_3months" => Ok(DateRange::Past3Months),
            "past_year" => Ok(DateRange::PastYear),
            "1990s" => Ok(DateRange::Decade1990s),
            "2000s" => Ok(DateRange::Decade2000s),
            "2010s" => Ok(DateRange::Decade2010s),
            "2020s" => Ok(DateRange::Decade2020s),
            other => Err(ArchiveError::malformed_filter(format!("unknown date range: {other}"))),
        }
    }

    /// Inclusive `[start, end)` bound, evaluated against `now`.
    fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            DateRange::PastWeek => (now - Duration::days(7), now),
            DateRange::PastMonth => (now - Duration::days(30), now),
            DateRange::Past3Months => (months_ago(now, 3), now),
            DateRange::PastYear => (now - Duration::days(365), now),
            DateRange::Decade1990s => (year_start(1990), year_start(2000)),
            DateRange::Decade2000s => (year_start(2000), year_start(2010)),
            DateRange::Decade2010s => (year_start(2010), year_start(2020)),
            DateRange::Decade2020s => (year_start(2020), year_start(2030)),
            DateRange::Custom { start, end } => (
                DateTime::from_naive_utc_and_offset(start.and_hms_opt(0, 0, 0).unwrap(), Utc),
                DateTime::from_naive_utc_and_offset(end.and_hms_opt(23, 59, 59).unwrap(), Utc),
            ),
        }
    }

    fn contains(&self, published: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        published >= start && published < end
    }
}

/// `past_3_months` is the first of the current calendar month, minus three
/// calendar months — not a fixed 90-day window.
fn months_ago(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let mut year = now.year();
    let mut month = now.month();
    for _ in 0..months {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    year_month_start(year, month)
}

fn year_start(year: i32) -> DateTime<Utc> {
    year_month_start(year, 1)
}

fn year_month_start(year: i32, month: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month");
    DateTime::from_naive_utc_and_offset(naive.and_hms_opt(0, 0, 0).unwrap(), Utc)
}

/// The conjunction of metadata predicates applied after vector retrieval.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    pub source: Option<String>,
    pub author: Option<String>,
    pub date_range: Option<DateRange>,
}

impl FilterSpec {
    fn matches(&self, meta: &VectorDocMeta, now: DateTime<Utc>) -> bool {
        if let Some(source) = &self.source {
            if &meta.source != source {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if meta.author.as_deref() != Some(author.as_str()) {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            match meta.published_date {
                Some(published) => {
                    if !range.contains(published, now) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }
}

/// Retains only candidates whose metadata satisfies every predicate in
/// `filter`. `now` is threaded through explicitly so tests are deterministic.
pub fn apply_filters<T>(candidates: Vec<T>, filter: &FilterSpec, now: DateTime<Utc>, meta_of: impl Fn(&T) -> &VectorDocMeta) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|c| filter.matches(meta_of(c), now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(source: &str, author: Option<&str>, published: Option<DateTime<Utc>>) -> VectorDocMeta {
        VectorDocMeta {
            article_id: 1,
            title: "t".to_string(),
            source: source.to_string(),
            author: author.map(|a| a.to_string()),
            published_date: published,
            is_chunk: false,
            chunk_index: 0,
        }
    }

    #[test]
    fn both_past_3_months_spellings_parse_to_the_same_variant() {
        assert_eq!(DateRange::parse("past_3_months").unwrap(), DateRange::Past3Months);
        assert_eq!(DateRange::parse("past_3months").unwrap(), DateRange::Past3Months);
    }

    #[test]
    fn unknown_range_name_is_malformed_filter() {
        assert!(DateRange::parse("next_week").is_err());
    }

    #[test]
    fn past_3_months_uses_calendar_month_boundaries_not_90_fixed_days() {
        let now = DateTime::parse_from_rfc3339("2026-07-27T00:00:00Z").unwrap().with_timezone(&Utc);
        let (start, _) = DateRange::Past3Months.bounds(now);
        assert_eq!(start, year_month_start(2026, 4));
    }

    #[test]
    fn source_and_author_predicates_conjoin() {
        let filter = FilterSpec {
            source: Some("marxist.com".to_string()),
            author: Some("Alan Woods".to_string()),
            date_range: None,
        };
        let now = Utc::now();
        assert!(filter.matches(&meta("marxist.com", Some("Alan Woods"), None), now));
        assert!(!filter.matches(&meta("other.com", Some("Alan Woods"), None), now));
        assert!(!filter.matches(&meta("marxist.com", Some("Someone Else"), None), now));
    }

    #[test]
    fn date_filter_excludes_articles_with_no_published_date() {
        let filter = FilterSpec {
            source: None,
            author: None,
            date_range: Some(DateRange::PastYear),
        };
        assert!(!filter.matches(&meta("s", None, None), Utc::now()));
    }

    #[test]
    fn decade_filters_are_half_open_ranges() {
        let now = Utc::now();
        let in_2005 = DateTime::parse_from_rfc3339("2005-06-01T00:00:00Z").unwrap().with_timezone(&Utc);
        assert!(DateRange::Decade2000s.contains(in_2005, now));
        assert!(!DateRange::Decade1990s.contains(in_2005, now));
    }
}
