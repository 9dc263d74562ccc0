use thiserror::Error;

/// Failures the hero field can report. None of them are fatal to the page:
/// front-ends log them and leave the panel blank.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeroError {
    /// A rendering capability (window, container, adapter, surface) is missing.
    #[error("rendering environment unavailable: {0}")]
    EnvironmentUnavailable(String),
    /// Rejected at construction time, never at render time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A single frame failed to draw; the next tick tries again.
    #[error("render failed: {0}")]
    Render(String),
}

pub type HeroResult<T> = Result<T, HeroError>;

impl HeroError {
    /// The page or device can't host a field. Front-ends treat this as a
    /// quiet no-op rather than a failure.
    pub fn is_environment_unavailable(&self) -> bool {
        matches!(self, HeroError::EnvironmentUnavailable(_))
    }
}
