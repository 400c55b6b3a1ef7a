//! Type definitions for the onboarding flow.

use std::fmt;

/// Identifier of one onboarding form step (1-based).
///
/// Transition targets are explicit — they arrive on the incoming UI action
/// rather than being computed arithmetically — so `StepId` is a value, not
/// a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(u8);

impl StepId {
    /// Step 1: course cluster choice.
    pub const COURSE_CLUSTER: StepId = StepId(1);

    /// Step 2: learning style choice.
    pub const LEARNING_STYLE: StepId = StepId(2);

    /// Step 3: confidence level.
    pub const CONFIDENCE: StepId = StepId(3);

    /// All steps in flow order.
    pub const ALL: [StepId; 3] = [
        StepId::COURSE_CLUSTER,
        StepId::LEARNING_STYLE,
        StepId::CONFIDENCE,
    ];

    /// The initial step.
    pub const FIRST: StepId = StepId::COURSE_CLUSTER;

    /// The final step, the only place `submit` is legal.
    pub const LAST: StepId = StepId::CONFIDENCE;

    /// Creates a step id, if `index` names an existing step.
    pub fn new(index: u8) -> Option<Self> {
        (1..=Self::ALL.len() as u8).contains(&index).then_some(Self(index))
    }

    /// Returns the 1-based step index.
    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.0)
    }
}

/// Where the flow currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// A form step is active.
    InProgress(StepId),
    /// Submission succeeded; the dashboard takes over. Terminal until the
    /// flow is reset (e.g. preferences were cleared externally).
    Completed,
}

/// A radio-button group's raw selection state.
///
/// Radio semantics replace the selection on [`select`](Self::select), but
/// the type can represent zero or several selections so validation can
/// reject malformed input instead of assuming the UI behaved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceGroup {
    selected: Vec<String>,
}

impl ChoiceGroup {
    /// Creates a group with nothing selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a group with a single selection.
    pub fn one(value: impl Into<String>) -> Self {
        Self {
            selected: vec![value.into()],
        }
    }

    /// Selects a value, replacing any prior selection (radio semantics).
    pub fn select(&mut self, value: impl Into<String>) {
        self.selected.clear();
        self.selected.push(value.into());
    }

    /// Adds a selection without clearing existing ones.
    ///
    /// Only malformed input produces multiple selections; validation
    /// rejects such groups.
    pub fn add_selection(&mut self, value: impl Into<String>) {
        self.selected.push(value.into());
    }

    /// Returns the selected value iff exactly one option is selected.
    pub fn selection(&self) -> Option<&str> {
        match self.selected.as_slice() {
            [value] => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns all selected values.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }
}

/// Raw onboarding form state as collected by the UI.
///
/// Values are unparsed strings; typing happens at submit, where unknown
/// choice values resolve to the documented enum defaults.
#[derive(Clone, Debug, Default)]
pub struct OnboardingForm {
    /// Step 1 radio group.
    pub course_cluster: ChoiceGroup,

    /// Step 2 radio group.
    pub learning_style: ChoiceGroup,

    /// Step 3 slider value, as raw text.
    pub confidence_level: Option<String>,
}

impl OnboardingForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a fully-filled form.
    pub fn filled(
        course_cluster: impl Into<String>,
        learning_style: impl Into<String>,
        confidence_level: impl Into<String>,
    ) -> Self {
        Self {
            course_cluster: ChoiceGroup::one(course_cluster),
            learning_style: ChoiceGroup::one(learning_style),
            confidence_level: Some(confidence_level.into()),
        }
    }
}
