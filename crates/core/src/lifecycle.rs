//! Generation request lifecycle.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──succeed──▶ Succeeded(result)
//!                      │
//!                      └──────fail───────▶ Failed(error)
//! ```
//!
//! Validation happens before `submit`; a form that fails validation goes
//! straight from `Idle` to `Failed`. There is no retry or cancel edge.

use serde::Serialize;

/// Illegal transition attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} a generation that is {from}")]
pub struct LifecycleError {
    pub from: &'static str,
    pub action: &'static str,
}

/// State of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Generation<T> {
    Idle,
    Submitting,
    Succeeded { result: T },
    Failed { error: String },
}

impl<T> Generation<T> {
    /// Name used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }

    /// Idle to Submitting.
    ///
    /// # Errors
    ///
    /// Fails from any state other than `Idle`.
    pub fn submit(self) -> Result<Self, LifecycleError> {
        match self {
            Self::Idle => Ok(Self::Submitting),
            other => Err(other.illegal("submit")),
        }
    }

    /// Submitting to Succeeded.
    ///
    /// # Errors
    ///
    /// Fails from any state other than `Submitting`.
    pub fn succeed(self, result: T) -> Result<Self, LifecycleError> {
        match self {
            Self::Submitting => Ok(Self::Succeeded { result }),
            other => Err(other.illegal("succeed")),
        }
    }

    /// Idle (rejected by validation) or Submitting (provider failure) to Failed.
    ///
    /// # Errors
    ///
    /// Fails once the request has already finished.
    pub fn fail(self, error: impl Into<String>) -> Result<Self, LifecycleError> {
        match self {
            Self::Idle | Self::Submitting => Ok(Self::Failed {
                error: error.into(),
            }),
            other => Err(other.illegal("fail")),
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    fn illegal(&self, action: &'static str) -> LifecycleError {
        LifecycleError {
            from: self.name(),
            action,
        }
    }
}

/// Response of a form action: the submitted form echoed back plus the
/// final lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionState<F, T> {
    pub form: F,
    #[serde(flatten)]
    pub state: Generation<T>,
}

impl<F, T> ActionState<F, T> {
    #[must_use]
    pub const fn new(form: F, state: Generation<T>) -> Self {
        Self { form, state }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_happy_path() {
        let state = Generation::<u8>::Idle.submit().unwrap().succeed(7).unwrap();
        assert_eq!(state, Generation::Succeeded { result: 7 });
        assert!(state.is_finished());
    }

    #[test]
    fn test_validation_failure_from_idle() {
        let state = Generation::<u8>::Idle.fail("bad input").unwrap();
        assert_eq!(
            state,
            Generation::Failed {
                error: "bad input".to_owned()
            }
        );
    }

    #[test]
    fn test_illegal_transitions() {
        let err = Generation::<u8>::Idle.succeed(1).unwrap_err();
        assert_eq!(err.to_string(), "cannot succeed a generation that is idle");

        let done = Generation::Succeeded { result: 1u8 };
        assert!(done.clone().submit().is_err());
        assert!(done.fail("late").is_err());

        let submitting = Generation::<u8>::Submitting;
        assert_eq!(submitting.submit().unwrap_err().from, "submitting");
    }

    #[test]
    fn test_action_state_shape() {
        let state = ActionState::new(
            json!({"productType": "jute bags"}),
            Generation::Succeeded { result: json!({"seoKeywords": []}) },
        );
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["status"], "succeeded");
        assert_eq!(value["form"]["productType"], "jute bags");
        assert!(value["result"]["seoKeywords"].is_array());

        let failed: ActionState<_, ()> =
            ActionState::new(json!({}), Generation::Failed { error: "x".into() });
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value, json!({"form": {}, "status": "failed", "error": "x"}));
    }
}
