//! Onboarding flow state machine.
//!
//! The flow walks a student through three form steps and, on successful
//! submission, produces the validated [`Preferences`] record:
//!
//! ```text
//! step 1 (course cluster) ──next──▶ step 2 (learning style) ──next──▶ step 3 (confidence)
//!        ◀──────back──────                ◀──────back──────                │ submit
//!                                                                         ▼
//!                                                                     Completed
//! ```
//!
//! - `next` validates the *current* step before honoring the explicit
//!   target carried on the UI action.
//! - `back` is unconditional — no validation on the way backwards.
//! - `submit` validates every step in order (the first offending field or
//!   group wins) and transitions to the terminal `Completed` state.
//!
//! Validation failures are recoverable notices, never fatal: the flow
//! stays on its current step and the error names the offending field.

pub mod types;

pub use types::{ChoiceGroup, FlowState, OnboardingForm, StepId};

use crate::error::ValidationError;
use crate::preferences::{ConfidenceLevel, CourseCluster, LearningStyle, Preferences};
use crate::types::Timestamp;

/// Validates one step of the form.
///
/// Required radio groups must have exactly one selected option; required
/// text fields must be non-empty. Returns the first offending field.
pub fn validate_step(form: &OnboardingForm, step: StepId) -> Result<(), ValidationError> {
    match step {
        StepId::COURSE_CLUSTER => validate_choice(&form.course_cluster, "course cluster"),
        StepId::LEARNING_STYLE => validate_choice(&form.learning_style, "learning style"),
        _ => {
            let filled = form
                .confidence_level
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty());
            if filled {
                Ok(())
            } else {
                Err(ValidationError::required_field("confidence level"))
            }
        }
    }
}

fn validate_choice(group: &ChoiceGroup, name: &str) -> Result<(), ValidationError> {
    match group.selected().len() {
        0 => Err(ValidationError::choice_required(name)),
        1 => Ok(()),
        _ => Err(ValidationError::multiple_selections(name)),
    }
}

/// Builds the preference record from a validated form.
///
/// Unknown choice values resolve to the enum defaults, as does a
/// non-integer confidence value; validation has already guaranteed the
/// fields are present.
fn build_preferences(form: &OnboardingForm, now: Timestamp) -> Preferences {
    let course_cluster = form
        .course_cluster
        .selection()
        .map(CourseCluster::from_form_value_or_default)
        .unwrap_or_default();

    let learning_style = form
        .learning_style
        .selection()
        .map(LearningStyle::from_form_value_or_default)
        .unwrap_or_default();

    let confidence_level = form
        .confidence_level
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(ConfidenceLevel::new_or_default)
        .unwrap_or_default();

    Preferences {
        course_cluster,
        learning_style,
        confidence_level,
        timestamp: now,
    }
}

/// The multi-step onboarding state machine.
///
/// Starts on step 1. Terminal state is `Completed`; once there, transition
/// calls are rejected until [`reset`](Self::reset) re-enters the flow
/// (which happens when preferences are cleared externally).
#[derive(Clone, Debug)]
pub struct OnboardingFlow {
    state: FlowState,
}

impl OnboardingFlow {
    /// Creates a flow positioned on the first step.
    pub fn new() -> Self {
        Self {
            state: FlowState::InProgress(StepId::FIRST),
        }
    }

    /// Returns the current flow state.
    #[inline]
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Returns the active step, or `None` once completed.
    pub fn current_step(&self) -> Option<StepId> {
        match self.state {
            FlowState::InProgress(step) => Some(step),
            FlowState::Completed => None,
        }
    }

    /// Returns true once submission has succeeded.
    pub fn is_completed(&self) -> bool {
        self.state == FlowState::Completed
    }

    /// Advances to `target` if the current step validates.
    ///
    /// On failure the flow stays put and the error names the offending
    /// field or group.
    pub fn next(
        &mut self,
        form: &OnboardingForm,
        target: StepId,
    ) -> Result<StepId, ValidationError> {
        let FlowState::InProgress(current) = self.state else {
            return Err(ValidationError::invalid_field(
                "onboarding",
                "flow is already completed",
            ));
        };

        validate_step(form, current)?;
        self.state = FlowState::InProgress(target);
        Ok(target)
    }

    /// Moves back to `target` unconditionally.
    ///
    /// Ignored once the flow has completed.
    pub fn back(&mut self, target: StepId) -> StepId {
        if let FlowState::InProgress(_) = self.state {
            self.state = FlowState::InProgress(target);
        }
        target
    }

    /// Validates the whole form and completes the flow.
    ///
    /// Steps are checked in order, so the reported error is always the
    /// first offending field. On success the flow is terminal and the
    /// caller persists the returned record.
    pub fn submit(
        &mut self,
        form: &OnboardingForm,
        now: Timestamp,
    ) -> Result<Preferences, ValidationError> {
        if self.state == FlowState::Completed {
            return Err(ValidationError::invalid_field(
                "onboarding",
                "flow is already completed",
            ));
        }

        for step in StepId::ALL {
            validate_step(form, step)?;
        }

        self.state = FlowState::Completed;
        Ok(build_preferences(form, now))
    }

    /// Re-enters the flow at step 1.
    ///
    /// Used when preferences are cleared externally and onboarding must
    /// run again.
    pub fn reset(&mut self) {
        self.state = FlowState::InProgress(StepId::FIRST);
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}
