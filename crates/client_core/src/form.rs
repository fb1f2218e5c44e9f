use shared::{
    domain::{ContinuousFeature, IntegerFeature},
    protocol::PredictionRequest,
};

/// Current values of the input widgets.
///
/// Values are kept as entered; range checks are left to the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: PredictionRequest,
}

impl FormState {
    pub fn new(values: PredictionRequest) -> Self {
        Self { values }
    }

    pub fn integer(&self, feature: IntegerFeature) -> i64 {
        self.values.integer(feature)
    }

    pub fn integer_mut(&mut self, feature: IntegerFeature) -> &mut i64 {
        self.values.integer_mut(feature)
    }

    pub fn set_integer(&mut self, feature: IntegerFeature, value: i64) {
        *self.values.integer_mut(feature) = value;
    }

    pub fn continuous(&self, feature: ContinuousFeature) -> f64 {
        self.values.continuous(feature)
    }

    pub fn continuous_mut(&mut self, feature: ContinuousFeature) -> &mut f64 {
        self.values.continuous_mut(feature)
    }

    pub fn set_continuous(&mut self, feature: ContinuousFeature, value: f64) {
        *self.values.continuous_mut(feature) = value;
    }

    pub fn readout(&self, feature: ContinuousFeature) -> String {
        feature.readout(self.continuous(feature))
    }

    pub fn readouts(&self) -> Vec<(ContinuousFeature, String)> {
        ContinuousFeature::ALL
            .into_iter()
            .map(|feature| (feature, self.readout(feature)))
            .collect()
    }

    /// Fresh request payload from the current values.
    pub fn to_request(&self) -> PredictionRequest {
        self.values.clone()
    }
}
