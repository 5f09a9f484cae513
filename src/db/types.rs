/// Database row types for ingested timetable and calendar data

/// Parent row for the timetables table, before insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimetable {
    pub semester: i64,
    pub course: String,
    pub course_code: String,
    pub batch: i64,
    pub academic_year: String,
}

/// Dependent row for timetable_periods; the timetable_id is stamped on at
/// insert time, once the parent id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPeriod {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject_code: Option<String>,
    pub subject_name: Option<String>,
    pub subject_type: Option<String>,
    pub faculty: Option<String>,
}

/// Row for the events table. batch and semester are JSON-encoded into TEXT
/// columns on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub event_name: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub source: String,
    pub batch: Vec<i64>,
    pub semester: Vec<i64>,
    pub event_type: String,
}

#[derive(Debug, Clone)]
pub struct DbTimetable {
    pub timetable_id: i64,
    pub semester: i64,
    pub course: String,
    pub course_code: String,
    pub batch: i64,
    pub academic_year: String,
}

#[derive(Debug, Clone)]
pub struct DbPeriod {
    pub period_id: i64,
    pub timetable_id: i64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject_code: Option<String>,
    pub subject_name: Option<String>,
    pub subject_type: Option<String>,
    pub faculty: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DbEvent {
    pub event_id: i64,
    pub event_name: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub source: String,
    pub batch: String,
    pub semester: String,
    pub event_type: String,
}
