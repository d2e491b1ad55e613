use std::fmt;

/// Reasons a release request is ignored without failing the step.
/// These are non-fatal and only reported as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Issue title carries no `!release` directive
    TitleMismatch { title: String },
    /// Issue author is not on the allow-list
    UnauthorizedAuthor { login: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TitleMismatch { .. } => {
                write!(f, "Issue name does not match. Returning")
            }
            SkipReason::UnauthorizedAuthor { login } => {
                write!(f, "User {} cannot perform deployments", login)
            }
        }
    }
}
