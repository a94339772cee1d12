//! Preference wizard: the eleven ordered questions asked before a recommendation.
//!
//! The server holds no session: clients send the step they are on plus the
//! answers so far, and get back where to go next.

use serde::Serialize;
use thiserror::Error;

use crate::recommendation::preferences::{
    ActionType, Preferences, ACADEMIC_STREAMS, COLLEGE_TYPES, EDUCATION_LEVELS, EXAM_OPTIONS,
    MAJOR_OPTIONS, PROGRAM_PREFERENCES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ActionType,
    EducationLevel,
    AcademicStream,
    SpecificMajors,
    ProgramPreference,
    Location,
    Budget,
    CollegeType,
    Exams,
    DreamCollege,
    AdditionalInfo,
}

pub const STEPS: [WizardStep; 11] = [
    WizardStep::ActionType,
    WizardStep::EducationLevel,
    WizardStep::AcademicStream,
    WizardStep::SpecificMajors,
    WizardStep::ProgramPreference,
    WizardStep::Location,
    WizardStep::Budget,
    WizardStep::CollegeType,
    WizardStep::Exams,
    WizardStep::DreamCollege,
    WizardStep::AdditionalInfo,
];

pub const TOTAL_STEPS: usize = STEPS.len();

/// What a client needs to render one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepDescriptor {
    pub index: usize,
    pub key: WizardStep,
    pub title: &'static str,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub progress_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WizardTransition {
    Step { step: usize, progress_percent: u32 },
    /// The user picked "compare" on the first step.
    SwitchToComparison,
    /// The last step was answered; the preferences can be submitted.
    ReadyToSubmit,
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("Unknown wizard step {0}")]
    UnknownStep(usize),

    #[error("Choose an option to continue")]
    ActionTypeRequired,
}

impl WizardStep {
    pub fn from_index(index: usize) -> Option<Self> {
        STEPS.get(index).copied()
    }

    pub fn index(self) -> usize {
        STEPS.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ActionType => "Get started",
            WizardStep::EducationLevel => "Education level",
            WizardStep::AcademicStream => "Academic stream",
            WizardStep::SpecificMajors => "Specific majors",
            WizardStep::ProgramPreference => "Program preference",
            WizardStep::Location => "Location",
            WizardStep::Budget => "Budget",
            WizardStep::CollegeType => "College type",
            WizardStep::Exams => "Entrance exams",
            WizardStep::DreamCollege => "Dream college",
            WizardStep::AdditionalInfo => "Anything else",
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            WizardStep::ActionType => "Do you want college matches or a side-by-side comparison?",
            WizardStep::EducationLevel => "What level of education are you applying for?",
            WizardStep::AcademicStream => "Which academic stream interests you?",
            WizardStep::SpecificMajors => "Which majors are you considering?",
            WizardStep::ProgramPreference => "Single major, double major, or still deciding?",
            WizardStep::Location => "Where would you like to study?",
            WizardStep::Budget => "What's your budget for annual tuition fees?",
            WizardStep::CollegeType => "What kind of institution do you prefer?",
            WizardStep::Exams => "Which entrance exams have you taken, and what did you score?",
            WizardStep::DreamCollege => "Describe your dream college.",
            WizardStep::AdditionalInfo => "Anything else we should know?",
        }
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            WizardStep::ActionType => &["match", "compare"],
            WizardStep::EducationLevel => EDUCATION_LEVELS,
            WizardStep::AcademicStream => ACADEMIC_STREAMS,
            WizardStep::SpecificMajors => MAJOR_OPTIONS,
            WizardStep::ProgramPreference => PROGRAM_PREFERENCES,
            WizardStep::CollegeType => COLLEGE_TYPES,
            WizardStep::Exams => EXAM_OPTIONS,
            WizardStep::Location
            | WizardStep::Budget
            | WizardStep::DreamCollege
            | WizardStep::AdditionalInfo => &[],
        }
    }

    pub fn descriptor(self) -> StepDescriptor {
        let index = self.index();
        StepDescriptor {
            index,
            key: self,
            title: self.title(),
            question: self.question(),
            options: self.options(),
            progress_percent: progress_percent(index),
        }
    }
}

pub fn descriptors() -> Vec<StepDescriptor> {
    STEPS.iter().map(|s| s.descriptor()).collect()
}

/// `round((step + 1) / 11 * 100)`
pub fn progress_percent(step: usize) -> u32 {
    (((step + 1) as f64 / TOTAL_STEPS as f64) * 100.0).round() as u32
}

/// Moves forward from `step`. Only the first step gates on an answer; every
/// other step may be skipped.
pub fn advance(step: usize, preferences: &Preferences) -> Result<WizardTransition, WizardError> {
    let current = WizardStep::from_index(step).ok_or(WizardError::UnknownStep(step))?;

    if current == WizardStep::ActionType {
        match preferences.action_type {
            None => return Err(WizardError::ActionTypeRequired),
            Some(ActionType::Compare) => return Ok(WizardTransition::SwitchToComparison),
            Some(ActionType::Match) => {}
        }
    }

    if step + 1 >= TOTAL_STEPS {
        return Ok(WizardTransition::ReadyToSubmit);
    }
    Ok(to_step(step + 1))
}

/// Moves back one step, staying on the first step.
pub fn back(step: usize) -> Result<WizardTransition, WizardError> {
    WizardStep::from_index(step).ok_or(WizardError::UnknownStep(step))?;
    Ok(to_step(step.saturating_sub(1)))
}

fn to_step(step: usize) -> WizardTransition {
    WizardTransition::Step {
        step,
        progress_percent: progress_percent(step),
    }
}
