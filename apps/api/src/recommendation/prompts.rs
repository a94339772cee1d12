// LLM prompt constants for the Recommendation module.

use crate::recommendation::currency;
use crate::recommendation::preferences::Preferences;

/// System prompt for recommendations. The extractor splits on numbered entries
/// that open with a capitalized name, so the model is asked to write them that way.
pub const RECOMMENDATION_SYSTEM: &str = "You are College Genie, an expert college admissions \
    consultant. Answer in plain text. \
    Number each recommended college (1., 2., ...) and start every entry with the \
    full college name on the same line as its number. \
    Do NOT use markdown tables.";

/// Recommendation prompt template. Every `{placeholder}` is replaced before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"You are a College Genie! Give me the top 5 colleges based on these preferences:

Education: {education_level} | Stream: {academic_stream} | Majors: {majors} | Program: {program_preference}
Location: {location}
Budget: {budget}/year | College Type: {college_types}
Exams: {exams} | Dream College: {dream_college}
Additional: {additional_info}

Please provide:
1. Top 5 college recommendations with name, location, and why it matches
2. Estimated fees for each
3. Admission requirements
4. Key strengths of each college
5. Next steps for applications

Make it comprehensive but concise!"#;

const NOT_SPECIFIED: &str = "Not specified";

/// Compiles the wizard answers into the recommendation prompt.
pub fn build_recommendation_prompt(prefs: &Preferences) -> String {
    let majors = join_or(&prefs.specific_majors, "Open to options");
    let college_types = join_or(&prefs.college_type, "Any type");

    let exams = if prefs.exams.is_empty() {
        "None specified".to_string()
    } else {
        prefs
            .exams
            .iter()
            .map(|e| format!("{}: {}", e.name, e.score))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let budget = currency::format_amount(prefs.budget.selected, prefs.currency());

    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{education_level}", or_default(&prefs.education_level, NOT_SPECIFIED))
        .replace("{academic_stream}", or_default(&prefs.academic_stream, NOT_SPECIFIED))
        .replace("{majors}", &majors)
        .replace(
            "{program_preference}",
            or_default(&prefs.program_preference, NOT_SPECIFIED),
        )
        .replace("{location}", &location_line(prefs))
        .replace("{budget}", &budget)
        .replace("{college_types}", &college_types)
        .replace("{exams}", &exams)
        .replace(
            "{dream_college}",
            or_default(&prefs.dream_college_description, "Open minded"),
        )
        .replace("{additional_info}", or_default(&prefs.additional_info, "None"))
}

/// `Country, State, City (free text)`, or `Flexible` when no place was given.
fn location_line(prefs: &Preferences) -> String {
    let loc = &prefs.location;
    let places: Vec<&str> = [&loc.country, &loc.state, &loc.city]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let mut line = if places.is_empty() {
        "Flexible".to_string()
    } else {
        places.join(", ")
    };

    let free_text = loc.free_text.trim();
    if !free_text.is_empty() {
        line.push_str(&format!(" ({free_text})"));
    }
    line
}

fn join_or(items: &[String], default: &str) -> String {
    if items.is_empty() {
        default.to_string()
    } else {
        items.join(", ")
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value
    }
}
