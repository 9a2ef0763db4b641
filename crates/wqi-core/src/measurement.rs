use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One water sample as entered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// °C. Accepted and validated, but not part of the index.
    pub temperature: f64,
    /// mg/L
    pub dissolved_oxygen: f64,
    #[serde(rename = "pH", alias = "ph")]
    pub ph: f64,
    /// µS/cm
    pub conductivity: f64,
    /// mg/L
    pub bod: f64,
    /// mg/L
    pub nitrate: f64,
    /// MPN/100mL
    pub fecal_coliform: f64,
}

impl Measurement {
    /// Default reading offered to a fresh input form.
    pub const fn sample() -> Self {
        Self {
            temperature: 25.0,
            dissolved_oxygen: 7.0,
            ph: 7.2,
            conductivity: 250.0,
            bod: 3.0,
            nitrate: 5.0,
            fecal_coliform: 100.0,
        }
    }

    pub const fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::DissolvedOxygen => self.dissolved_oxygen,
            Parameter::Ph => self.ph,
            Parameter::Conductivity => self.conductivity,
            Parameter::Bod => self.bod,
            Parameter::Nitrate => self.nitrate,
            Parameter::FecalColiform => self.fecal_coliform,
        }
    }

    /// Checks the data-quality gate: every reading must be finite and > 0.
    pub fn validate(self) -> Result<ValidatedMeasurement, ValidationError> {
        let rejected = Parameter::ALL
            .into_iter()
            .filter(|p| !is_plausible(self.value(*p)))
            .collect::<Vec<_>>();

        if rejected.is_empty() {
            Ok(ValidatedMeasurement(self))
        } else {
            Err(ValidationError { rejected })
        }
    }
}

fn is_plausible(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// A [`Measurement`] that passed [`Measurement::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedMeasurement(Measurement);

impl ValidatedMeasurement {
    pub const fn get(&self) -> &Measurement {
        &self.0
    }

    pub const fn into_inner(self) -> Measurement {
        self.0
    }
}

impl std::ops::Deref for ValidatedMeasurement {
    type Target = Measurement;

    fn deref(&self) -> &Measurement {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parameter {
    Temperature,
    DissolvedOxygen,
    #[serde(rename = "pH")]
    Ph,
    Conductivity,
    Bod,
    Nitrate,
    FecalColiform,
}

impl Parameter {
    /// Input order of the measurement form.
    pub const ALL: [Self; 7] = [
        Self::Temperature,
        Self::DissolvedOxygen,
        Self::Ph,
        Self::Conductivity,
        Self::Bod,
        Self::Nitrate,
        Self::FecalColiform,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::DissolvedOxygen => "dissolvedOxygen",
            Self::Ph => "pH",
            Self::Conductivity => "conductivity",
            Self::Bod => "bod",
            Self::Nitrate => "nitrate",
            Self::FecalColiform => "fecalColiform",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::DissolvedOxygen => "Dissolved Oxygen",
            Self::Ph => "pH Level",
            Self::Conductivity => "Conductivity",
            Self::Bod => "BOD",
            Self::Nitrate => "Nitrate",
            Self::FecalColiform => "Fecal Coliform",
        }
    }

    /// Empty for unitless readings.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::DissolvedOxygen | Self::Bod | Self::Nitrate => "mg/L",
            Self::Ph => "",
            Self::Conductivity => "µS/cm",
            Self::FecalColiform => "MPN/100mL",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Temperature => {
                "Water temperature affects dissolved oxygen levels and biological activity (°C)"
            }
            Self::DissolvedOxygen => {
                "Amount of oxygen dissolved in water, critical for aquatic life (mg/L)"
            }
            Self::Ph => "Measure of water acidity/alkalinity. Optimal range: 6.5-8.5",
            Self::Conductivity => "Indicates dissolved salts and minerals in water (µS/cm)",
            Self::Bod => "Biochemical Oxygen Demand - organic pollution indicator (mg/L)",
            Self::Nitrate => "Nitrogen compounds from fertilizers and waste (mg/L)",
            Self::FecalColiform => "Bacterial indicator of sewage contamination (MPN/100mL)",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
