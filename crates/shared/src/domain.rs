use std::{fmt, ops::RangeInclusive};

/// Discrete inputs sent as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntegerFeature {
    Season,
    Year,
    Month,
    Hour,
    Holiday,
    Weekday,
    WorkingDay,
    Weather,
}

impl IntegerFeature {
    pub const ALL: [IntegerFeature; 8] = [
        IntegerFeature::Season,
        IntegerFeature::Year,
        IntegerFeature::Month,
        IntegerFeature::Hour,
        IntegerFeature::Holiday,
        IntegerFeature::Weekday,
        IntegerFeature::WorkingDay,
        IntegerFeature::Weather,
    ];

    /// Field name on the wire.
    pub fn key(self) -> &'static str {
        match self {
            IntegerFeature::Season => "season",
            IntegerFeature::Year => "yr",
            IntegerFeature::Month => "mnth",
            IntegerFeature::Hour => "hr",
            IntegerFeature::Holiday => "holiday",
            IntegerFeature::Weekday => "weekday",
            IntegerFeature::WorkingDay => "workingday",
            IntegerFeature::Weather => "weathersit",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            IntegerFeature::Season => "Season",
            IntegerFeature::Year => "Year",
            IntegerFeature::Month => "Month",
            IntegerFeature::Hour => "Hour",
            IntegerFeature::Holiday => "Holiday",
            IntegerFeature::Weekday => "Weekday",
            IntegerFeature::WorkingDay => "Working day",
            IntegerFeature::Weather => "Weather",
        }
    }

    pub fn range(self) -> RangeInclusive<i64> {
        match self {
            IntegerFeature::Season => 1..=4,
            IntegerFeature::Year => 0..=1,
            IntegerFeature::Month => 1..=12,
            IntegerFeature::Hour => 0..=23,
            IntegerFeature::Holiday => 0..=1,
            IntegerFeature::Weekday => 0..=6,
            IntegerFeature::WorkingDay => 0..=1,
            IntegerFeature::Weather => 1..=4,
        }
    }

    /// Option labels in range order. Empty for plain numeric inputs.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            IntegerFeature::Season => &["Spring", "Summer", "Fall", "Winter"],
            IntegerFeature::Year => &["2011", "2012"],
            IntegerFeature::Holiday | IntegerFeature::WorkingDay => &["No", "Yes"],
            IntegerFeature::Weekday => &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            IntegerFeature::Weather => &["Clear", "Mist/Cloudy", "Light Rain/Snow", "Heavy Rain"],
            IntegerFeature::Month | IntegerFeature::Hour => &[],
        }
    }

    /// Label for `value`, falling back to the number itself.
    pub fn option_label(self, value: i64) -> String {
        let start = *self.range().start();
        usize::try_from(value - start)
            .ok()
            .and_then(|idx| self.labels().get(idx))
            .map(|label| (*label).to_string())
            .unwrap_or_else(|| value.to_string())
    }
}

impl fmt::Display for IntegerFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Weather measurements sent normalized to `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContinuousFeature {
    Temperature,
    FeelsLike,
    Humidity,
    WindSpeed,
}

impl ContinuousFeature {
    pub const ALL: [ContinuousFeature; 4] = [
        ContinuousFeature::Temperature,
        ContinuousFeature::FeelsLike,
        ContinuousFeature::Humidity,
        ContinuousFeature::WindSpeed,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ContinuousFeature::Temperature => "temp",
            ContinuousFeature::FeelsLike => "atemp",
            ContinuousFeature::Humidity => "hum",
            ContinuousFeature::WindSpeed => "windspeed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ContinuousFeature::Temperature => "Temperature",
            ContinuousFeature::FeelsLike => "Feels like",
            ContinuousFeature::Humidity => "Humidity",
            ContinuousFeature::WindSpeed => "Wind speed",
        }
    }

    /// Physical value represented by a normalized `1.0`.
    pub fn scale(self) -> f64 {
        match self {
            ContinuousFeature::Temperature => 41.0,
            ContinuousFeature::FeelsLike => 50.0,
            ContinuousFeature::Humidity => 100.0,
            ContinuousFeature::WindSpeed => 67.0,
        }
    }

    pub fn unit_suffix(self) -> &'static str {
        match self {
            ContinuousFeature::Temperature | ContinuousFeature::FeelsLike => "°C",
            ContinuousFeature::Humidity => "%",
            ContinuousFeature::WindSpeed => " km/h",
        }
    }

    /// Text shown next to the slider, e.g. `31°C` for a temperature of `0.76`.
    pub fn readout(self, normalized: f64) -> String {
        let physical = (normalized * self.scale()).round() as i64;
        format!("{physical}{}", self.unit_suffix())
    }

    pub fn normalization_note(self) -> String {
        format!("Normalized (actual_{} / {})", self.key(), self.scale())
    }
}

impl fmt::Display for ContinuousFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
