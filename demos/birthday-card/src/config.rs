use morph_engine::ConfigError;
use serde::Deserialize;

/// Card text and interaction tuning, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Phrase drawn in gold when the wish is made.
    pub wish_text: String,
    /// Letter body revealed by the typewriter. `\n` breaks lines.
    pub letter_text: String,
    /// Meter gain per blow tick while pressed.
    pub blow_step: f32,
    /// Meter loss per blow tick while released. 0 freezes the meter on release.
    pub blow_decay: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            wish_text: "HAPPY BIRTHDAY".to_owned(),
            letter_text: "Dear friend,\n\nHappy birthday!\n\nMay this year bring you\ncalm days and bright wishes.\n\nWith love".to_owned(),
            blow_step: 4.0,
            blow_decay: 0.0,
        }
    }
}

impl CardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.blow_step > 0.0 && self.blow_step <= 100.0) {
            return Err(ConfigError::OutOfRange {
                field: "blow_step",
                expected: "in (0, 100]",
                value: self.blow_step,
            });
        }
        if !(self.blow_decay >= 0.0 && self.blow_decay <= 100.0) {
            return Err(ConfigError::OutOfRange {
                field: "blow_decay",
                expected: "in [0, 100]",
                value: self.blow_decay,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CardConfig::from_json(r#"{"wish_text": "HAPPY 30TH"}"#).unwrap();
        assert_eq!(config.wish_text, "HAPPY 30TH");
        assert_eq!(config.blow_step, 4.0);
        assert_eq!(config.blow_decay, 0.0);
    }

    #[test]
    fn rejects_out_of_range_tuning() {
        let err = CardConfig::from_json(r#"{"blow_step": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "blow_step", .. }));
        let err = CardConfig::from_json(r#"{"blow_decay": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "blow_decay", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(CardConfig::from_json("[1,"), Err(ConfigError::Json(_))));
    }
}
