//! Converting ADC codes to temperatures.

use serde::Deserialize;

use crate::hw::mcp3008::MAX_CODE;

/// Linear analog temperature sensor read through a ratiometric ADC.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SensorModel {
    /// ADC reference voltage in volts.
    pub reference_voltage: f64,
    /// Sensor output slope in millivolts per degree Celsius.
    pub millivolts_per_degree: f64,
}

impl Default for SensorModel {
    /// LM35 (10 mV/°C) against a 3.3 V reference.
    fn default() -> SensorModel {
        SensorModel {
            reference_voltage: 3.3,
            millivolts_per_degree: 10.0,
        }
    }
}

impl SensorModel {
    /// Voltage at the ADC input for a code.
    pub fn voltage(&self, adc_value: i32) -> f64 {
        (adc_value as f64 * self.reference_voltage) / MAX_CODE as f64
    }

    /// Temperature in degrees Celsius for a code.
    ///
    /// The code is not range-checked; [`crate::hw::mcp3008::INVALID_CODE`] converts to a negative temperature.
    pub fn celsius(&self, adc_value: i32) -> f64 {
        self.voltage(adc_value) * (1000.0 / self.millivolts_per_degree)
    }
}

/// Convert a code to degrees Celsius using the default LM35 model.
pub fn convert_to_temperature(adc_value: i32) -> f64 {
    SensorModel::default().celsius(adc_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn zero_code_is_zero_degrees() {
        assert_eq!(convert_to_temperature(0), 0.0);
    }

    #[test]
    fn full_scale_is_reference_over_slope() {
        assert!((convert_to_temperature(1023) - 330.0).abs() < EPSILON);
    }

    #[test]
    fn sentinel_is_not_clamped() {
        assert!(convert_to_temperature(-1) < 0.0);
    }

    #[test]
    fn custom_model_scales_slope() {
        let model = SensorModel { reference_voltage: 5.0, millivolts_per_degree: 20.0 };
        assert!((model.voltage(1023) - 5.0).abs() < EPSILON);
        assert!((model.celsius(1023) - 250.0).abs() < EPSILON);
    }
}
