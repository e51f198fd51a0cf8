//! Quick-range presets and detection of which one a from/to pair matches.

use std::fmt;
use std::str::FromStr;

use time::{Date, Duration, Month, OffsetDateTime};

use super::metadata::parse_day;

/// Preset bound to one of the range buttons above the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickRangePreset {
    Today,
    Last7,
    Last30,
    Last90,
    Last365,
    YearToDate,
    Custom,
}

impl QuickRangePreset {
    /// Presets that get a button, in display order.
    pub const ALL_BUTTONS: [QuickRangePreset; 6] = [
        Self::Today,
        Self::Last7,
        Self::Last30,
        Self::Last90,
        Self::Last365,
        Self::YearToDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last7 => "7",
            Self::Last30 => "30",
            Self::Last90 => "90",
            Self::Last365 => "365",
            Self::YearToDate => "ytd",
            Self::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Last7 => "7 days",
            Self::Last30 => "30 days",
            Self::Last90 => "90 days",
            Self::Last365 => "1 year",
            Self::YearToDate => "Year to date",
            Self::Custom => "Custom",
        }
    }

    /// Length of a trailing window ending today, in inclusive days.
    fn trailing_days(self) -> Option<i64> {
        match self {
            Self::Today => Some(1),
            Self::Last7 => Some(7),
            Self::Last30 => Some(30),
            Self::Last90 => Some(90),
            Self::Last365 => Some(365),
            Self::YearToDate | Self::Custom => None,
        }
    }

    /// The inclusive `(from, to)` pair this preset's button applies.
    pub fn range(self, today: Date) -> Option<(Date, Date)> {
        match self {
            Self::YearToDate => Some((start_of_year(today), today)),
            Self::Custom => None,
            trailing => {
                let days = trailing.trailing_days()?;
                let from = today.checked_sub(Duration::days(days - 1))?;
                Some((from, today))
            }
        }
    }
}

impl fmt::Display for QuickRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickRangePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "today" => Ok(Self::Today),
            "7" => Ok(Self::Last7),
            "30" => Ok(Self::Last30),
            "90" => Ok(Self::Last90),
            "365" => Ok(Self::Last365),
            "ytd" => Ok(Self::YearToDate),
            "custom" => Ok(Self::Custom),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown range preset `{0}`")]
pub struct UnknownPreset(pub String);

/// Match an inclusive from/to pair against the presets.
///
/// Missing dates, or `from` after `to`, are `Custom`.
pub fn detect_preset(from: Option<Date>, to: Option<Date>, today: Date) -> QuickRangePreset {
    let (Some(from), Some(to)) = (from, to) else {
        return QuickRangePreset::Custom;
    };

    let diff_days = (to - from).whole_days() + 1;
    if diff_days < 1 {
        return QuickRangePreset::Custom;
    }

    if to == today {
        let trailing = QuickRangePreset::ALL_BUTTONS
            .into_iter()
            .find(|preset| preset.trailing_days() == Some(diff_days));
        if let Some(preset) = trailing {
            return preset;
        }
        if from == start_of_year(today) {
            return QuickRangePreset::YearToDate;
        }
    }

    QuickRangePreset::Custom
}

/// Parse a date-picker value (`YYYY-MM-DD`); blanks and junk are `None`.
pub fn parse_date_input(raw: &str) -> Option<Date> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_day(raw)
}

/// Today's calendar day in the local timezone (UTC if the offset is unknown).
pub fn today_local() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

fn start_of_year(today: Date) -> Date {
    Date::from_calendar_date(today.year(), Month::January, 1).unwrap_or(today)
}

/// What the two date fields currently hold.
///
/// `Unselected` (a field is blank or unreadable) and an explicit range that
/// matches no preset both detect as `Custom`; this type keeps them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSelection {
    #[default]
    Unselected,
    Explicit { from: Date, to: Date },
}

impl RangeSelection {
    pub fn from_inputs(from: &str, to: &str) -> Self {
        match (parse_date_input(from), parse_date_input(to)) {
            (Some(from), Some(to)) => Self::Explicit { from, to },
            _ => Self::Unselected,
        }
    }

    pub fn from_preset(preset: QuickRangePreset, today: Date) -> Self {
        match preset.range(today) {
            Some((from, to)) => Self::Explicit { from, to },
            None => Self::Unselected,
        }
    }

    pub fn preset(&self, today: Date) -> QuickRangePreset {
        match *self {
            Self::Unselected => QuickRangePreset::Custom,
            Self::Explicit { from, to } => detect_preset(Some(from), Some(to), today),
        }
    }

    /// Whether `day` falls inside the selection. Everything is inside
    /// `Unselected`.
    pub fn contains(&self, day: Date) -> bool {
        match *self {
            Self::Unselected => true,
            Self::Explicit { from, to } => from <= day && day <= to,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Explicit { .. })
    }
}
