use crate::types::err::ConfigError;

/// A configurable value, paired with a name and the bounds within which the value may be set.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }
}

impl<T: Clone + PartialOrd + std::fmt::Debug> ConfigOption<T> {
    /// Sets the option to `value`, if `value` is within the bounds of the option.
    ///
    /// ```rust
    /// # use otter_logic::config::Config;
    /// let mut config = Config::default();
    /// assert!(config.polarity_lean.set(0.5).is_ok());
    /// assert!(config.polarity_lean.set(2.0).is_err());
    /// assert_eq!(config.polarity_lean.value, 0.5);
    /// ```
    pub fn set(&mut self, value: T) -> Result<(), ConfigError> {
        if self.min <= value && value <= self.max {
            self.value = value;
            Ok(())
        } else {
            Err(ConfigError::OutOfBounds {
                name: self.name,
                min: format!("{:?}", self.min),
                max: format!("{:?}", self.max),
            })
        }
    }
}
