//! Tests for the telemetry CSV parser


use std::io::Write;
use tempfile::NamedTempFile;

/// A short, well-formed flight log with every expected column
pub fn create_test_flight_csv() -> String {
    "Tiempo_ms,Temperatura_C,Humedad_%,Presion_hPa,Resistencia_Gas_KOhm,AccelX_g,AccelY_g,AccelZ_g,GyroX_dps,GyroY_dps,GyroZ_dps,Roll_deg,Pitch_deg,Altitud_m\n\
     0,21.4,48.2,944.1,312.5,0.01,-0.02,1.00,0.5,-0.3,0.1,1.2,-0.8,571.3\n\
     100,21.3,48.4,943.9,305.1,0.02,-0.01,1.01,0.4,-0.2,0.2,1.1,-0.7,572.0\n\
     200,21.1,48.9,942.7,298.8,0.15,0.04,2.35,12.5,3.1,-4.2,5.4,2.2,583.6\n"
        .to_string()
}

/// Write content to a temporary file
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(content)
        .expect("Failed to write temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}
