//! Application constants for the telemetry processor
//!
//! This module contains the telemetry column names, physical plausibility
//! bounds, air-quality thresholds and default values used throughout the
//! processing pipeline.

// =============================================================================
// Telemetry Column Names
// =============================================================================

/// Column headers written by the probe firmware
pub mod columns {
    /// Milliseconds since boot - the deduplication key
    pub const TIME_MS: &str = "Tiempo_ms";
    pub const TEMPERATURE: &str = "Temperatura_C";
    pub const HUMIDITY: &str = "Humedad_%";
    pub const PRESSURE: &str = "Presion_hPa";
    /// Gas-sensor resistance in kilo-ohms
    pub const RESISTANCE: &str = "Resistencia_Gas_KOhm";
    pub const ACCEL_X: &str = "AccelX_g";
    pub const ACCEL_Y: &str = "AccelY_g";
    pub const ACCEL_Z: &str = "AccelZ_g";
    pub const GYRO_X: &str = "GyroX_dps";
    pub const GYRO_Y: &str = "GyroY_dps";
    pub const GYRO_Z: &str = "GyroZ_dps";
    pub const ROLL: &str = "Roll_deg";
    pub const PITCH: &str = "Pitch_deg";
    pub const ALTITUDE: &str = "Altitud_m";
}

/// An expected telemetry variable and the unit its column is recorded in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedVariable {
    pub column: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

impl ExpectedVariable {
    pub const fn new(column: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self {
            column,
            label,
            unit,
        }
    }
}

/// Variables the probe is expected to record; absence is advisory only
pub const EXPECTED_VARIABLES: &[ExpectedVariable] = &[
    ExpectedVariable::new(columns::TIME_MS, "time", "ms"),
    ExpectedVariable::new(columns::TEMPERATURE, "temperature", "°C"),
    ExpectedVariable::new(columns::HUMIDITY, "humidity", "%"),
    ExpectedVariable::new(columns::PRESSURE, "pressure", "hPa"),
    ExpectedVariable::new(columns::RESISTANCE, "gas resistance", "kΩ"),
    ExpectedVariable::new(columns::ACCEL_X, "acceleration x", "g"),
    ExpectedVariable::new(columns::ACCEL_Y, "acceleration y", "g"),
    ExpectedVariable::new(columns::ACCEL_Z, "acceleration z", "g"),
    ExpectedVariable::new(columns::GYRO_X, "angular rate x", "°/s"),
    ExpectedVariable::new(columns::GYRO_Y, "angular rate y", "°/s"),
    ExpectedVariable::new(columns::GYRO_Z, "angular rate z", "°/s"),
    ExpectedVariable::new(columns::ROLL, "roll", "°"),
    ExpectedVariable::new(columns::PITCH, "pitch", "°"),
    ExpectedVariable::new(columns::ALTITUDE, "altitude", "m"),
];

/// Look up the unit for a column, if it is an expected variable
pub fn unit_for(column: &str) -> Option<&'static str> {
    EXPECTED_VARIABLES
        .iter()
        .find(|variable| variable.column == column)
        .map(|variable| variable.unit)
}

// =============================================================================
// Physical Plausibility Bounds
// =============================================================================

/// Inclusive physical range for one sensor column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalBound {
    pub column: &'static str,
    pub min: f64,
    pub max: f64,
}

impl PhysicalBound {
    pub const fn new(column: &'static str, min: f64, max: f64) -> Self {
        Self { column, min, max }
    }

    /// Check whether a value lies within the inclusive range
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Physical bounds checked by the range filter, in evaluation order
///
/// Sensor envelopes: BME680 (temperature, humidity, pressure), MPU-6050
/// full-scale ranges (acceleration, angular rate), barometric altitude.
pub const PHYSICAL_BOUNDS: &[PhysicalBound] = &[
    PhysicalBound::new(columns::TEMPERATURE, -50.0, 85.0),
    PhysicalBound::new(columns::PRESSURE, 300.0, 1100.0),
    PhysicalBound::new(columns::HUMIDITY, 0.0, 100.0),
    PhysicalBound::new(columns::ACCEL_X, -16.0, 16.0),
    PhysicalBound::new(columns::ACCEL_Y, -16.0, 16.0),
    PhysicalBound::new(columns::ACCEL_Z, -16.0, 16.0),
    PhysicalBound::new(columns::GYRO_X, -2000.0, 2000.0),
    PhysicalBound::new(columns::GYRO_Y, -2000.0, 2000.0),
    PhysicalBound::new(columns::GYRO_Z, -2000.0, 2000.0),
    PhysicalBound::new(columns::ALTITUDE, -500.0, 10_000.0),
];

// =============================================================================
// Altitude Correction
// =============================================================================

/// Ground-level altitude of the launch site in metres
pub const DEFAULT_BASE_ALTITUDE: f64 = 571.0;

/// Sentinel accepted wherever an altitude interval is expected
pub const ALTITUDE_INTERVAL_ALL: &str = "all";

// =============================================================================
// Air Quality Thresholds (kΩ, inclusive lower bounds)
// =============================================================================

pub mod air_quality_thresholds {
    pub const EXCELLENT: f64 = 300.0;
    pub const GOOD: f64 = 200.0;
    pub const MODERATE: f64 = 100.0;
    pub const POOR: f64 = 50.0;
    pub const VERY_POOR: f64 = 0.0;
}

// =============================================================================
// Configuration and Logging
// =============================================================================

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "telemetry-processor";

/// Config file name within the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the baseline altitude
pub const ENV_BASE_ALTITUDE: &str = "TELEMETRY_BASE_ALTITUDE";

/// Environment variable overriding the altitude aggregation interval
pub const ENV_ALTITUDE_INTERVAL: &str = "TELEMETRY_ALTITUDE_INTERVAL";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "TELEMETRY_LOG_LEVEL";

/// Log levels accepted in configuration
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Default log level when neither -v nor -q is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Row count above which cleaning stages show progress bars
pub const PROGRESS_BAR_THRESHOLD: usize = 50_000;
