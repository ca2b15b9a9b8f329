use thiserror::Error;

/// Failure surface of the guidance core.
///
/// The core is total for well-formed input; everything that can go wrong is
/// an upstream or programming error in the supplied route, reported with a
/// diagnostic naming the offending element. Attribute gaps never land here,
/// they degrade to conservative defaults instead.
#[derive(Error, Debug)]
pub enum GuidanceError {
    #[error("invalid route input: {0}")]
    InvalidRouteInput(String),
}

impl GuidanceError {
    pub(crate) fn invalid(diagnostic: impl Into<String>) -> Self {
        GuidanceError::InvalidRouteInput(diagnostic.into())
    }
}
