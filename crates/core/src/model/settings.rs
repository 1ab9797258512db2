use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("quiz duration must be > 0 seconds")]
    InvalidDuration,

    #[error("progress width must be between 1 and 9 digits")]
    InvalidProgressWidth,
}

/// Fixed configuration of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    duration_secs: u32,
    progress_width: usize,
}

impl QuizSettings {
    /// Five minutes to answer, progress rendered as `00/00`.
    pub const DEFAULT_DURATION_SECS: u32 = 300;
    pub const DEFAULT_PROGRESS_WIDTH: usize = 2;

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidDuration` for a zero duration and
    /// `SettingsError::InvalidProgressWidth` for a width outside `1..=9`.
    pub fn new(duration_secs: u32, progress_width: usize) -> Result<Self, SettingsError> {
        if duration_secs == 0 {
            return Err(SettingsError::InvalidDuration);
        }
        if !(1..=9).contains(&progress_width) {
            return Err(SettingsError::InvalidProgressWidth);
        }
        Ok(Self {
            duration_secs,
            progress_width,
        })
    }

    /// Same as `new` with the default progress width.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidDuration` for a zero duration.
    pub fn with_duration(duration_secs: u32) -> Result<Self, SettingsError> {
        Self::new(duration_secs, Self::DEFAULT_PROGRESS_WIDTH)
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn progress_width(&self) -> usize {
        self.progress_width
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            duration_secs: Self::DEFAULT_DURATION_SECS,
            progress_width: Self::DEFAULT_PROGRESS_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let settings = QuizSettings::default();
        assert_eq!(settings.duration_secs(), 300);
        assert_eq!(settings.progress_width(), 2);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            QuizSettings::new(0, 2).unwrap_err(),
            SettingsError::InvalidDuration
        );
        assert_eq!(
            QuizSettings::new(60, 0).unwrap_err(),
            SettingsError::InvalidProgressWidth
        );
        assert_eq!(
            QuizSettings::new(60, 10).unwrap_err(),
            SettingsError::InvalidProgressWidth
        );
        assert!(QuizSettings::with_duration(5).is_ok());
    }
}
