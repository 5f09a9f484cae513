//! Wire types for extracted documents.
//!
//! Field names mirror the JSON shapes the extraction prompts ask the model
//! to produce, so these deserialize straight from normalized model output.

use serde::{Deserialize, Serialize};

/// One academic timetable for a (course, batch, semester, year) tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableDocument {
    pub semester: i64,
    pub course: String,
    pub batch: i64,
    #[serde(rename = "academicYear")]
    pub academic_year: String,
    pub timetable: Vec<DaySchedule>,
}

impl TimetableDocument {
    /// Total number of periods across all days.
    pub fn period_count(&self) -> usize {
        self.timetable.iter().map(|d| d.periods.len()).sum()
    }
}

/// A day name plus its ordered periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: String,
    pub periods: Vec<Period>,
}

/// A single teaching slot within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub subject: Subject,
    #[serde(default)]
    pub faculty: Option<String>,
}

/// Subject taught in a period. Every field is independently optional;
/// the model sometimes omits codes for free slots or seminars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub subject_type: Option<String>,
}

/// One dated entry from an academic calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// "DD MMM YYYY", kept textual.
    pub date: String,
    #[serde(default, rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(default, rename = "endTime")]
    pub end_time: Option<String>,
    /// Expected to be "acadCalendar" | "email" | "adminEntry"; persisted
    /// verbatim, not validated.
    pub source: String,
    #[serde(default)]
    pub batch: Option<Vec<i64>>,
    #[serde(default)]
    pub semester: Option<Vec<i64>>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
}

/// Degree programs Tickter knows about.
///
/// `Unknown` keeps the original course string so the fallback is visible in
/// logs instead of being folded away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    ComputerScience,
    ElectronicsAndCommunication,
    CyberSecurity,
    ArtificialIntelligenceAndDataScience,
    Unknown(String),
}

impl Program {
    /// Matches a course name from an extracted document. The match is exact;
    /// anything else lands in `Unknown`.
    pub fn from_course_name(course: &str) -> Self {
        match course {
            "Computer Science and Engineering" => Program::ComputerScience,
            "Electronics and Communication Engineering" => Program::ElectronicsAndCommunication,
            "Cyber Security" => Program::CyberSecurity,
            "Artificial Intelligence and Data Science" => {
                Program::ArtificialIntelligenceAndDataScience
            }
            other => Program::Unknown(other.to_string()),
        }
    }

    /// Short course code used in the timetables table. Unrecognized programs
    /// fall back to "CSE".
    pub fn code(&self) -> &'static str {
        match self {
            Program::ComputerScience | Program::Unknown(_) => "CSE",
            Program::ElectronicsAndCommunication => "ECE",
            Program::CyberSecurity => "CSY",
            Program::ArtificialIntelligenceAndDataScience => "CSD",
        }
    }

    /// Returns true if the course name did not match any known program.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Program::Unknown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_codes() {
        assert_eq!(
            Program::from_course_name("Computer Science and Engineering").code(),
            "CSE"
        );
        assert_eq!(
            Program::from_course_name("Electronics and Communication Engineering").code(),
            "ECE"
        );
        assert_eq!(Program::from_course_name("Cyber Security").code(), "CSY");
        assert_eq!(
            Program::from_course_name("Artificial Intelligence and Data Science").code(),
            "CSD"
        );
    }

    #[test]
    fn test_program_unknown_falls_back_to_cse() {
        let program = Program::from_course_name("Mechanical Engineering");
        assert!(program.is_unknown());
        assert_eq!(program.code(), "CSE");
    }

    #[test]
    fn test_program_match_is_exact() {
        // Case and whitespace matter; near-misses are Unknown.
        assert!(Program::from_course_name("cyber security").is_unknown());
        assert!(Program::from_course_name("Cyber Security ").is_unknown());
    }

    #[test]
    fn test_timetable_document_deserializes_prompt_shape() {
        let json = r#"{
            "semester": 5,
            "course": "Cyber Security",
            "batch": 1,
            "academicYear": "2025",
            "timetable": [
                {
                    "day": "Monday",
                    "periods": [
                        {
                            "startTime": "09:00",
                            "endTime": "09:55",
                            "subject": {"code": "X1", "name": "Intro", "type": "Theory"},
                            "faculty": "Dr. A"
                        }
                    ]
                }
            ]
        }"#;

        let doc: TimetableDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.semester, 5);
        assert_eq!(doc.academic_year, "2025");
        assert_eq!(doc.period_count(), 1);
        assert_eq!(
            doc.timetable[0].periods[0].subject.subject_type.as_deref(),
            Some("Theory")
        );
    }

    #[test]
    fn test_period_tolerates_missing_subject_fields() {
        let json = r#"{"startTime": "12:00", "endTime": "12:55", "subject": {}}"#;
        let period: Period = serde_json::from_str(json).unwrap();
        assert!(period.subject.code.is_none());
        assert!(period.faculty.is_none());
    }

    #[test]
    fn test_calendar_event_optional_fields_default() {
        let json = r#"{
            "date": "12 Aug 2025",
            "eventName": "Independence Day",
            "source": "acadCalendar"
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(event.batch.is_none());
        assert!(event.semester.is_none());
        assert!(event.event_type.is_none());
        assert!(event.start_time.is_none());
    }
}
