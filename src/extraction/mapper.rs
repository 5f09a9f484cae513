//! Maps normalized extraction output onto relational row shapes.
//!
//! Pure transforms: no time-format, overlap, or weekday validation happens
//! here. The prompt contract is trusted; the store applies what constraints
//! it has.

use super::types::{CalendarEvent, Program, TimetableDocument};
use crate::db::{NewEvent, NewPeriod, NewTimetable};
use tracing::warn;

/// Default semester spread for events that do not name one: all of them.
const ALL_SEMESTERS: [i64; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Batch value meaning "all batches".
const ALL_BATCHES: [i64; 1] = [0];

/// A timetable document flattened into its parent row and dependent rows.
#[derive(Debug, Clone)]
pub struct MappedTimetable {
    pub timetable: NewTimetable,
    pub periods: Vec<NewPeriod>,
}

/// Maps one timetable document to its row shapes.
///
/// The course code is derived by exact-match lookup over the known programs;
/// anything unrecognized is logged and falls back to "CSE".
pub fn map_timetable(doc: &TimetableDocument) -> MappedTimetable {
    let program = Program::from_course_name(&doc.course);
    if program.is_unknown() {
        warn!(
            course = %doc.course,
            fallback_code = program.code(),
            "Unrecognized course name, falling back to default course code"
        );
    }

    let timetable = NewTimetable {
        semester: doc.semester,
        course: doc.course.clone(),
        course_code: program.code().to_string(),
        batch: doc.batch,
        academic_year: doc.academic_year.clone(),
    };

    let periods = doc
        .timetable
        .iter()
        .flat_map(|day| {
            day.periods.iter().map(|period| NewPeriod {
                day: day.day.clone(),
                start_time: period.start_time.clone(),
                end_time: period.end_time.clone(),
                subject_code: period.subject.code.clone(),
                subject_name: period.subject.name.clone(),
                subject_type: period.subject.subject_type.clone(),
                faculty: period.faculty.clone(),
            })
        })
        .collect();

    MappedTimetable { timetable, periods }
}

/// Maps a batch of timetable documents, preserving input order.
pub fn map_timetables(docs: &[TimetableDocument]) -> Vec<MappedTimetable> {
    docs.iter().map(map_timetable).collect()
}

/// Maps one calendar event, filling the documented defaults for absent
/// fields. `source` passes through verbatim.
pub fn map_calendar_event(event: &CalendarEvent) -> NewEvent {
    NewEvent {
        event_name: event.event_name.clone(),
        description: event.description.clone(),
        date: event.date.clone(),
        start_time: event.start_time.clone(),
        end_time: event.end_time.clone(),
        source: event.source.clone(),
        batch: event.batch.clone().unwrap_or_else(|| ALL_BATCHES.to_vec()),
        semester: event
            .semester
            .clone()
            .unwrap_or_else(|| ALL_SEMESTERS.to_vec()),
        event_type: event
            .event_type
            .clone()
            .unwrap_or_else(|| "other".to_string()),
    }
}

/// Maps a batch of calendar events, preserving input order.
pub fn map_calendar_events(events: &[CalendarEvent]) -> Vec<NewEvent> {
    events.iter().map(map_calendar_event).collect()
}
