use serde::{Deserialize, Serialize};

/// A full manual parameter set for the camera.
///
/// `Default` is the stock preset of the daA2500-14uc this crate was written
/// against. The values are written verbatim to the device; range checking
/// is left to the camera, which rejects anything its sensor cannot do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Exposure time in microseconds.
    pub exposure_us: f64,
    /// Analog gain in dB.
    pub gain_db: f64,
    /// Black level offset in DN.
    pub black_level: f64,
    /// Gamma correction exponent.
    pub gamma: f64,
    /// White balance ratio for the red channel.
    pub balance_red: f64,
    /// White balance ratio for the green channel.
    pub balance_green: f64,
    /// White balance ratio for the blue channel.
    pub balance_blue: f64,
    /// Hue shift in degrees.
    pub hue: f64,
    /// Color saturation factor.
    pub saturation: f64,
    /// Contrast in the range -1 to 1.
    pub contrast: f64,
    /// Brightness in the range -1 to 1.
    pub brightness: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            exposure_us: 1246.0,
            gain_db: 1.0,
            black_level: 0.0,
            gamma: 1.0,
            balance_red: 1.297,
            balance_green: 1.063,
            balance_blue: 1.0,
            hue: 0.0,
            saturation: 1.0,
            contrast: 0.0,
            brightness: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CameraSettings;

    #[test]
    fn default_matches_stock_preset() {
        let preset = CameraSettings::default();
        assert_eq!(preset.exposure_us, 1246.0);
        assert_eq!(preset.gain_db, 1.0);
        assert_eq!(preset.balance_red, 1.297);
        assert_eq!(preset.balance_green, 1.063);
        assert_eq!(preset.balance_blue, 1.0);
        assert_eq!(preset.gamma, 1.0);
        assert_eq!(preset.hue, 0.0);
        assert_eq!(preset.saturation, 1.0);
    }

    #[test]
    fn settings_survive_json_persistence() {
        let mut tuned = CameraSettings::default();
        tuned.exposure_us = 5037.0;
        tuned.gamma = 1.134;
        tuned.brightness = -0.1;

        let json = serde_json::to_string(&tuned).unwrap();
        let back: CameraSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuned);
    }
}
