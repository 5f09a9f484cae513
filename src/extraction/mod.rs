/// AI document extraction pipeline for timetable images and calendar PDFs
mod client;
mod error;
mod mapper;
mod normalize;
mod prompt;
mod types;

pub use client::{generate_correlation_id, GeminiClient, GeminiConfig};
pub use error::ExtractionError;
pub use mapper::{
    map_calendar_event, map_calendar_events, map_timetable, map_timetables, MappedTimetable,
};
pub use normalize::{parse_calendar_events, parse_timetable_documents, strip_code_fences};
pub use types::{CalendarEvent, DaySchedule, Period, Program, Subject, TimetableDocument};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

/// Extracts timetable documents from an uploaded image or PDF.
///
/// One model round trip, then normalization into typed documents. A response
/// that is not valid JSON fails the whole request; nothing is retried.
///
/// # Arguments
/// * `client` - The extraction model client
/// * `media_type` - MIME type of the upload
/// * `payload` - The raw file bytes
/// * `correlation_id` - Request-scoped ID threaded through log lines
pub async fn extract_timetables(
    client: &GeminiClient,
    media_type: &str,
    payload: &[u8],
    correlation_id: &str,
) -> Result<Vec<TimetableDocument>, ExtractionError> {
    let encoded = STANDARD.encode(payload);
    let raw = client
        .generate(media_type, &encoded, prompt::TIMETABLE_PROMPT, correlation_id)
        .await?;

    let docs = normalize::parse_timetable_documents(&raw)?;
    info!(
        correlation_id = %correlation_id,
        documents = docs.len(),
        periods = docs.iter().map(TimetableDocument::period_count).sum::<usize>(),
        "Parsed timetable documents from model output"
    );

    Ok(docs)
}

/// Extracts calendar events from an uploaded academic calendar.
pub async fn extract_calendar_events(
    client: &GeminiClient,
    media_type: &str,
    payload: &[u8],
    correlation_id: &str,
) -> Result<Vec<CalendarEvent>, ExtractionError> {
    let encoded = STANDARD.encode(payload);
    let raw = client
        .generate(media_type, &encoded, prompt::CALENDAR_PROMPT, correlation_id)
        .await?;

    let events = normalize::parse_calendar_events(&raw)?;
    info!(
        correlation_id = %correlation_id,
        events = events.len(),
        "Parsed calendar events from model output"
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::IngestDbManager;
    use rusqlite::Connection;

    // A canned model response, as the live API would return it.
    const MOCK_TIMETABLE_RESPONSE: &str = r#"[{"semester":5,"course":"Cyber Security","batch":1,"academicYear":"2025","timetable":[{"day":"Monday","periods":[{"startTime":"09:00","endTime":"09:55","subject":{"code":"X1","name":"Intro","type":"Theory"},"faculty":"Dr. A"}]}]}]"#;

    const MOCK_CALENDAR_RESPONSE: &str = r#"```json
[
  {"date": "12 Aug 2025", "eventName": "Independence Day", "source": "acadCalendar", "type": "holiday"},
  {"date": "20 Oct 2025", "eventName": "Series Exam I", "source": "acadCalendar",
   "batch": [1, 2], "semester": [5], "type": "exam", "startTime": "09:30", "endTime": "10:30"}
]
```"#;

    fn in_memory_manager() -> IngestDbManager {
        IngestDbManager::from_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_timetable_response_flows_to_persisted_rows() {
        let docs = parse_timetable_documents(MOCK_TIMETABLE_RESPONSE).unwrap();
        let mapped = map_timetables(&docs);

        let manager = in_memory_manager();
        let ids = manager.insert_timetables(&mapped).unwrap();
        assert_eq!(ids.len(), 1);

        let parent = manager.get_timetable(ids[0]).unwrap();
        assert_eq!(parent.course_code, "CSY");
        assert_eq!(parent.course, "Cyber Security");
        assert_eq!(parent.semester, 5);
        assert_eq!(parent.academic_year, "2025");

        let periods = manager.get_periods_for_timetable(ids[0]).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].day, "Monday");
        assert_eq!(periods[0].start_time, "09:00");
        assert_eq!(periods[0].faculty.as_deref(), Some("Dr. A"));
        assert_eq!(periods[0].timetable_id, ids[0]);
    }

    #[test]
    fn test_calendar_response_flows_to_persisted_rows() {
        let events = parse_calendar_events(MOCK_CALENDAR_RESPONSE).unwrap();
        let rows = map_calendar_events(&events);

        let manager = in_memory_manager();
        assert_eq!(manager.insert_calendar_events(&rows).unwrap(), 2);

        let stored = manager.get_all_events().unwrap();
        // Missing batch/semester fall back to all-batches/all-semesters.
        assert_eq!(stored[0].batch, "[0]");
        assert_eq!(stored[0].semester, "[1,2,3,4,5,6,7,8]");
        assert_eq!(stored[1].batch, "[1,2]");
        assert_eq!(stored[1].start_time.as_deref(), Some("09:30"));
    }
}
