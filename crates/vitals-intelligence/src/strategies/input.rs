// ABOUTME: Path-specific strategy inputs: legacy records or a canonical metric series
// ABOUTME: Filters each representation to the request window and resolves unit labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use chrono::NaiveDateTime;
use vitals_core::models::{CanonicalMetricSeries, DateRange, LegacyRecord, TimedValue};

use crate::alignment::end_of_day;

/// Raw points for one metric, in the representation of the chosen data path
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesInput {
    /// Flat legacy records
    Legacy(Vec<LegacyRecord>),
    /// Canonical metric series
    Cms(CanonicalMetricSeries),
}

impl SeriesInput {
    /// Valued points inside `range`, stably sorted by timestamp
    ///
    /// Legacy records are compared on their stored timestamp, CMS samples on
    /// their wall-clock time in their own offset.
    #[must_use]
    pub fn filtered(&self, range: &DateRange) -> Vec<TimedValue> {
        let in_range = |ts: NaiveDateTime| ts >= range.from && ts <= range.to;
        let mut points: Vec<TimedValue> = match self {
            Self::Legacy(records) => records
                .iter()
                .filter(|record| record.value.is_some() && in_range(record.timestamp))
                .map(TimedValue::from)
                .collect(),
            Self::Cms(series) => series
                .samples
                .iter()
                .filter(|sample| sample.value.is_some() && in_range(sample.local_timestamp()))
                .map(TimedValue::from)
                .collect(),
        };
        points.sort_by_key(|point| point.timestamp);
        points
    }

    /// Unit recorded with the data itself
    #[must_use]
    pub fn recorded_unit(&self) -> Option<&str> {
        match self {
            Self::Legacy(records) => records.iter().find_map(|record| record.unit.as_deref()),
            Self::Cms(series) => series.unit.as_deref(),
        }
    }
}

/// One metric handed to a strategy
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyInput {
    /// Stable identifier
    pub series_id: String,
    /// Legend label
    pub display_name: String,
    /// Unit label, request-level unit first, then the unit recorded with the data
    pub unit: Option<String>,
    /// Path-specific points
    pub data: SeriesInput,
}

impl StrategyInput {
    /// Filtered points, see [`SeriesInput::filtered`]
    #[must_use]
    pub fn points(&self, range: &DateRange) -> Vec<TimedValue> {
        self.data.filtered(range)
    }
}

/// Request window with `to` extended to the end of its day, `None` when empty
#[must_use]
pub fn request_range(from: NaiveDateTime, to: NaiveDateTime) -> Option<DateRange> {
    let to = end_of_day(to);
    (from <= to).then_some(DateRange { from, to })
}

/// Shared unit if every unit agrees, otherwise `None`
#[must_use]
pub fn shared_unit<'a>(units: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let mut units = units.into_iter();
    let first = units.next()??;
    units
        .all(|unit| unit == Some(first))
        .then(|| first.to_owned())
}

/// Shared unit when both agree, `"a / b"` when they differ, else whichever exists
#[must_use]
pub fn compound_unit(primary: Option<&str>, secondary: Option<&str>) -> Option<String> {
    match (primary, secondary) {
        (Some(a), Some(b)) if a == b => Some(a.to_owned()),
        (Some(a), Some(b)) => Some(format!("{a} / {b}")),
        (Some(unit), None) | (None, Some(unit)) => Some(unit.to_owned()),
        (None, None) => None,
    }
}

/// Unit of `a / b`: dimensionless when both agree
#[must_use]
pub fn ratio_unit(primary: Option<&str>, secondary: Option<&str>) -> Option<String> {
    match (primary, secondary) {
        (Some(a), Some(b)) if a == b => None,
        _ => compound_unit(primary, secondary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use vitals_core::models::MetricSample;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_request_range_extends_to_end_of_day() {
        let range = request_range(at(1, 0), at(3, 0)).unwrap();
        assert!(range.to > at(3, 23));
        assert!(request_range(at(4, 0), at(3, 0)).is_none());
    }

    #[test]
    fn test_legacy_and_cms_filter_identically() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let samples = vec![
            MetricSample::new(offset.from_local_datetime(&at(3, 22)).unwrap(), Some(3.0)),
            MetricSample::new(offset.from_local_datetime(&at(1, 8)).unwrap(), Some(1.0)),
            MetricSample::new(offset.from_local_datetime(&at(2, 8)).unwrap(), None),
            MetricSample::new(offset.from_local_datetime(&at(9, 8)).unwrap(), Some(9.0)),
        ];
        let cms = CanonicalMetricSeries::new("steps", None, samples);
        let legacy = SeriesInput::Legacy(cms.to_legacy_records());
        let cms = SeriesInput::Cms(cms);

        let range = request_range(at(1, 0), at(3, 0)).unwrap();
        let from_cms = cms.filtered(&range);
        assert_eq!(from_cms, legacy.filtered(&range));
        assert_eq!(from_cms.len(), 2);
        assert_eq!(from_cms[0].timestamp, at(1, 8));
        assert_eq!(from_cms[1].timestamp, at(3, 22));
    }

    #[test]
    fn test_unit_resolution() {
        assert_eq!(compound_unit(Some("kg"), Some("kg")).as_deref(), Some("kg"));
        assert_eq!(compound_unit(Some("kcal"), Some("steps")).as_deref(), Some("kcal / steps"));
        assert_eq!(ratio_unit(Some("kg"), Some("kg")), None);
        assert_eq!(shared_unit([Some("bpm"), Some("bpm")]).as_deref(), Some("bpm"));
        assert_eq!(shared_unit([Some("bpm"), None]), None);
    }
}
