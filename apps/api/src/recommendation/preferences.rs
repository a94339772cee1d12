//! Wizard answers collected from the user before a recommendation is requested.

use serde::{Deserialize, Serialize};

use crate::recommendation::currency::{self, Currency, DEFAULT_CURRENCY_CODE};

pub const EDUCATION_LEVELS: &[&str] = &[
    "Undergraduate (Bachelor's)",
    "Postgraduate (Master's)",
    "Diploma / Advanced Diploma",
    "Certificate Course",
    "Ph.D. / Doctorate",
    "Others",
];

pub const ACADEMIC_STREAMS: &[&str] = &[
    "Science & Technology",
    "Commerce & Business",
    "Arts / Humanities",
    "Law",
    "Medical & Healthcare",
    "Design / Creative Fields",
    "Vocational / Skill-based",
    "Undecided / Open to suggestions",
    "Others",
];

pub const MAJOR_OPTIONS: &[&str] = &[
    "Computer Science",
    "Economics",
    "Psychology",
    "Mechanical Engineering",
    "Journalism",
    "Fashion Design",
    "Law",
    "Architecture",
    "Biotechnology",
    "Artificial Intelligence / Data Science",
];

pub const PROGRAM_PREFERENCES: &[&str] = &["single-major", "double-major", "undecided"];

pub const COLLEGE_TYPES: &[&str] = &[
    "Government / Public University",
    "Private University",
    "International Institution",
    "Community College",
    "Doesn't matter / Open to all",
];

pub const EXAM_OPTIONS: &[&str] = &[
    "JEE", "NEET", "SAT", "GRE", "GMAT", "CLAT", "CAT", "IELTS", "TOEFL",
];

pub const BUDGET_FLOOR: u64 = 50_000;
pub const BUDGET_CEILING: u64 = 3_000_000;
const DEFAULT_BUDGET: u64 = 650_000;

/// What the user wants to do from the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Match,
    Compare,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPreference {
    pub country: String,
    pub state: String,
    pub city: String,
    pub free_text: String,
}

/// Annual tuition budget, in whole units of the selected currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub min: u64,
    pub max: u64,
    pub selected: u64,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            min: BUDGET_FLOOR,
            max: BUDGET_CEILING,
            selected: DEFAULT_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamScore {
    pub name: String,
    pub score: String,
}

/// Every answer the wizard collects. Missing JSON fields take their defaults,
/// so partially filled wizards deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub action_type: Option<ActionType>,
    pub education_level: String,
    pub academic_stream: String,
    pub specific_majors: Vec<String>,
    pub program_preference: String,
    pub location: LocationPreference,
    pub budget: Budget,
    /// ISO 4217 code the budget is expressed in.
    pub currency: String,
    pub college_type: Vec<String>,
    pub exams: Vec<ExamScore>,
    pub dream_college_description: String,
    pub additional_info: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            action_type: None,
            education_level: String::new(),
            academic_stream: String::new(),
            specific_majors: Vec::new(),
            program_preference: String::new(),
            location: LocationPreference::default(),
            budget: Budget::default(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            college_type: Vec::new(),
            exams: Vec::new(),
            dream_college_description: String::new(),
            additional_info: String::new(),
        }
    }
}

impl Preferences {
    /// Trims free-text answers and drops blank or repeated list entries.
    pub fn normalized(mut self) -> Self {
        self.education_level = self.education_level.trim().to_string();
        self.academic_stream = self.academic_stream.trim().to_string();
        self.program_preference = self.program_preference.trim().to_string();
        self.specific_majors = dedup_non_blank(self.specific_majors);
        self.college_type = dedup_non_blank(self.college_type);
        self.location.country = self.location.country.trim().to_string();
        self.location.state = self.location.state.trim().to_string();
        self.location.city = self.location.city.trim().to_string();
        self.location.free_text = self.location.free_text.trim().to_string();
        for exam in &mut self.exams {
            exam.name = exam.name.trim().to_string();
            exam.score = exam.score.trim().to_string();
        }
        self.dream_college_description = self.dream_college_description.trim().to_string();
        self.additional_info = self.additional_info.trim().to_string();
        self
    }

    /// Returns every problem found. An empty list means the answers can be
    /// compiled into a prompt.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let budget = &self.budget;
        if budget.min > budget.max {
            problems.push(format!(
                "budget.min ({}) must not exceed budget.max ({})",
                budget.min, budget.max
            ));
        } else if !(budget.min..=budget.max).contains(&budget.selected) {
            problems.push(format!(
                "budget.selected ({}) must be between {} and {}",
                budget.selected, budget.min, budget.max
            ));
        }

        for (i, exam) in self.exams.iter().enumerate() {
            if exam.name.trim().is_empty() || exam.score.trim().is_empty() {
                problems.push(format!("exams[{i}] needs both a name and a score"));
            }
        }

        if currency::find(&self.currency).is_none() {
            problems.push(format!("unknown currency code '{}'", self.currency));
        }

        problems
    }

    /// The currency the budget is expressed in, falling back to INR.
    pub fn currency(&self) -> &'static Currency {
        currency::find(&self.currency)
            .or_else(|| currency::find(DEFAULT_CURRENCY_CODE))
            .unwrap_or(&currency::CURRENCIES[0])
    }
}

fn dedup_non_blank(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !item.is_empty() && !seen.iter().any(|s| s.eq_ignore_ascii_case(&item)) {
            seen.push(item);
        }
    }
    seen
}
