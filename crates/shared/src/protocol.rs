use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ContinuousFeature, IntegerFeature};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub season: i64,
    pub yr: i64,
    pub mnth: i64,
    pub hr: i64,
    pub holiday: i64,
    pub weekday: i64,
    pub workingday: i64,
    pub weathersit: i64,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
}

impl PredictionRequest {
    pub fn integer(&self, feature: IntegerFeature) -> i64 {
        match feature {
            IntegerFeature::Season => self.season,
            IntegerFeature::Year => self.yr,
            IntegerFeature::Month => self.mnth,
            IntegerFeature::Hour => self.hr,
            IntegerFeature::Holiday => self.holiday,
            IntegerFeature::Weekday => self.weekday,
            IntegerFeature::WorkingDay => self.workingday,
            IntegerFeature::Weather => self.weathersit,
        }
    }

    pub fn integer_mut(&mut self, feature: IntegerFeature) -> &mut i64 {
        match feature {
            IntegerFeature::Season => &mut self.season,
            IntegerFeature::Year => &mut self.yr,
            IntegerFeature::Month => &mut self.mnth,
            IntegerFeature::Hour => &mut self.hr,
            IntegerFeature::Holiday => &mut self.holiday,
            IntegerFeature::Weekday => &mut self.weekday,
            IntegerFeature::WorkingDay => &mut self.workingday,
            IntegerFeature::Weather => &mut self.weathersit,
        }
    }

    pub fn continuous(&self, feature: ContinuousFeature) -> f64 {
        match feature {
            ContinuousFeature::Temperature => self.temp,
            ContinuousFeature::FeelsLike => self.atemp,
            ContinuousFeature::Humidity => self.hum,
            ContinuousFeature::WindSpeed => self.windspeed,
        }
    }

    pub fn continuous_mut(&mut self, feature: ContinuousFeature) -> &mut f64 {
        match feature {
            ContinuousFeature::Temperature => &mut self.temp,
            ContinuousFeature::FeelsLike => &mut self.atemp,
            ContinuousFeature::Humidity => &mut self.hum,
            ContinuousFeature::WindSpeed => &mut self.windspeed,
        }
    }
}

impl Default for PredictionRequest {
    /// The example conditions documented by the prediction service.
    fn default() -> Self {
        Self {
            season: 3,
            yr: 1,
            mnth: 9,
            hr: 17,
            holiday: 0,
            weekday: 4,
            workingday: 1,
            weathersit: 1,
            temp: 0.76,
            atemp: 0.72,
            hum: 0.45,
            windspeed: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Absent means the backend did not report a ready model.
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One entry of `GET /api/features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub type FeatureCatalog = BTreeMap<String, FeatureInfo>;

/// Catalog built from the local feature descriptors, matching what the
/// service publishes.
pub fn local_feature_catalog() -> FeatureCatalog {
    let mut catalog = FeatureCatalog::new();
    for feature in IntegerFeature::ALL {
        let range = feature.range();
        catalog.insert(
            feature.key().to_string(),
            FeatureInfo {
                min: *range.start() as f64,
                max: *range.end() as f64,
                labels: feature.labels().iter().map(|l| (*l).to_string()).collect(),
                description: None,
            },
        );
    }
    for feature in ContinuousFeature::ALL {
        catalog.insert(
            feature.key().to_string(),
            FeatureInfo {
                min: 0.0,
                max: 1.0,
                labels: Vec::new(),
                description: Some(feature.normalization_note()),
            },
        );
    }
    catalog
}
