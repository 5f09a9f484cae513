/// Database module for ingested timetable and calendar data

mod error;
mod types;

pub use error::PersistenceError;
pub use types::{DbEvent, DbPeriod, DbTimetable, NewEvent, NewPeriod, NewTimetable};

use crate::extraction::MappedTimetable;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::Mutex;
use tracing::{info, warn};

const SCHEMA_SQL: &str = include_str!("../../sql/init_tickter.sql");

/// Handle to the ingest store. Constructed once at startup and injected into
/// whatever needs it; the connection mutex serializes concurrent writes.
pub struct IngestDbManager {
    db: Mutex<Connection>,
}

impl IngestDbManager {
    /// Opens (or creates) the database at the given path and applies the
    /// schema.
    pub fn open(db_path: &str) -> Result<Self, PersistenceError> {
        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    /// Wraps an existing connection and applies the schema. Used with
    /// in-memory connections in tests.
    pub fn from_connection(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Persists one timetable document: parent row first, then every period
    /// row stamped with the generated parent id.
    ///
    /// The parent insert must return the generated id; if it does not, the
    /// dependent insert is never attempted. Both phases run in a single
    /// transaction, so a failed period insert rolls the parent back rather
    /// than leaving an orphan.
    ///
    /// # Returns
    /// The generated timetable id.
    pub fn insert_timetable(&self, doc: &MappedTimetable) -> Result<i64, PersistenceError> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        let created_at = Utc::now().to_rfc3339();

        let timetable_id: i64 = tx
            .query_row(
                "INSERT INTO timetables (semester, course, course_code, batch, academic_year, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING timetable_id",
                params![
                    doc.timetable.semester,
                    &doc.timetable.course,
                    &doc.timetable.course_code,
                    doc.timetable.batch,
                    &doc.timetable.academic_year,
                    &created_at,
                ],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => PersistenceError::MissingInsertId {
                    table: "timetables",
                },
                other => PersistenceError::Database(other),
            })?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO timetable_periods (
                    timetable_id, day, start_time, end_time,
                    subject_code, subject_name, subject_type, faculty, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;

            for period in &doc.periods {
                stmt.execute(params![
                    timetable_id,
                    &period.day,
                    &period.start_time,
                    &period.end_time,
                    &period.subject_code,
                    &period.subject_name,
                    &period.subject_type,
                    &period.faculty,
                    &created_at,
                ])?;
            }
        }

        tx.commit()?;

        info!(
            timetable_id,
            periods = doc.periods.len(),
            course_code = %doc.timetable.course_code,
            "Timetable and periods inserted"
        );

        Ok(timetable_id)
    }

    /// Persists a batch of timetable documents strictly one at a time, in
    /// input order. The first failure aborts the remaining documents;
    /// documents persisted before the failure stay persisted.
    ///
    /// # Returns
    /// The generated timetable ids, in input order.
    pub fn insert_timetables(
        &self,
        docs: &[MappedTimetable],
    ) -> Result<Vec<i64>, PersistenceError> {
        let mut ids = Vec::with_capacity(docs.len());
        for (index, doc) in docs.iter().enumerate() {
            match self.insert_timetable(doc) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    warn!(
                        document_index = index,
                        persisted = ids.len(),
                        remaining = docs.len() - index,
                        "Aborting timetable batch after insert failure"
                    );
                    return Err(e);
                }
            }
        }
        Ok(ids)
    }

    /// Persists calendar events in one bulk insert. The whole batch commits
    /// or rolls back together; there is no parent relation.
    ///
    /// # Returns
    /// The number of rows inserted.
    pub fn insert_calendar_events(&self, events: &[NewEvent]) -> Result<usize, PersistenceError> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        let created_at = Utc::now().to_rfc3339();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO events (
                    event_name, description, date, start_time, end_time,
                    source, batch, semester, event_type, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;

            for event in events {
                let batch_json = serde_json::to_string(&event.batch).unwrap();
                let semester_json = serde_json::to_string(&event.semester).unwrap();

                stmt.execute(params![
                    &event.event_name,
                    &event.description,
                    &event.date,
                    &event.start_time,
                    &event.end_time,
                    &event.source,
                    batch_json,
                    semester_json,
                    &event.event_type,
                    &created_at,
                ])?;
            }
        }

        tx.commit()?;

        info!(events = events.len(), "Calendar events inserted");
        Ok(events.len())
    }

    /// Gets one timetable parent row.
    pub fn get_timetable(&self, timetable_id: i64) -> Result<DbTimetable, PersistenceError> {
        let db = self.db.lock().unwrap();
        let timetable = db.query_row(
            "SELECT timetable_id, semester, course, course_code, batch, academic_year
             FROM timetables WHERE timetable_id = ?",
            [timetable_id],
            |row| {
                Ok(DbTimetable {
                    timetable_id: row.get(0)?,
                    semester: row.get(1)?,
                    course: row.get(2)?,
                    course_code: row.get(3)?,
                    batch: row.get(4)?,
                    academic_year: row.get(5)?,
                })
            },
        )?;
        Ok(timetable)
    }

    /// Gets all period rows belonging to a timetable, in insertion order.
    pub fn get_periods_for_timetable(
        &self,
        timetable_id: i64,
    ) -> Result<Vec<DbPeriod>, PersistenceError> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT period_id, timetable_id, day, start_time, end_time,
                    subject_code, subject_name, subject_type, faculty
             FROM timetable_periods
             WHERE timetable_id = ?
             ORDER BY period_id",
        )?;

        let periods = stmt
            .query_map([timetable_id], |row| {
                Ok(DbPeriod {
                    period_id: row.get(0)?,
                    timetable_id: row.get(1)?,
                    day: row.get(2)?,
                    start_time: row.get(3)?,
                    end_time: row.get(4)?,
                    subject_code: row.get(5)?,
                    subject_name: row.get(6)?,
                    subject_type: row.get(7)?,
                    faculty: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(periods)
    }

    /// Counts parent timetable rows.
    pub fn timetable_count(&self) -> Result<i64, PersistenceError> {
        let db = self.db.lock().unwrap();
        let count = db.query_row("SELECT COUNT(*) FROM timetables", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Gets all calendar event rows, in insertion order.
    pub fn get_all_events(&self) -> Result<Vec<DbEvent>, PersistenceError> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT event_id, event_name, description, date, start_time, end_time,
                    source, batch, semester, event_type
             FROM events
             ORDER BY event_id",
        )?;

        let events = stmt
            .query_map([], |row| {
                Ok(DbEvent {
                    event_id: row.get(0)?,
                    event_name: row.get(1)?,
                    description: row.get(2)?,
                    date: row.get(3)?,
                    start_time: row.get(4)?,
                    end_time: row.get(5)?,
                    source: row.get(6)?,
                    batch: row.get(7)?,
                    semester: row.get(8)?,
                    event_type: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::MappedTimetable;

    fn in_memory_manager() -> IngestDbManager {
        IngestDbManager::from_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn period(day: &str, start: &str) -> NewPeriod {
        NewPeriod {
            day: day.to_string(),
            start_time: start.to_string(),
            end_time: format!("{}:55", &start[..2]),
            subject_code: Some("CST301".to_string()),
            subject_name: Some("Formal Languages".to_string()),
            subject_type: Some("Theory".to_string()),
            faculty: Some("Dr. A".to_string()),
        }
    }

    fn document(course_code: &str, periods: Vec<NewPeriod>) -> MappedTimetable {
        MappedTimetable {
            timetable: NewTimetable {
                semester: 5,
                course: "Cyber Security".to_string(),
                course_code: course_code.to_string(),
                batch: 1,
                academic_year: "2025".to_string(),
            },
            periods,
        }
    }

    fn event(name: &str) -> NewEvent {
        NewEvent {
            event_name: name.to_string(),
            description: None,
            date: "12 Aug 2025".to_string(),
            start_time: None,
            end_time: None,
            source: "acadCalendar".to_string(),
            batch: vec![0],
            semester: vec![1, 2, 3, 4, 5, 6, 7, 8],
            event_type: "holiday".to_string(),
        }
    }

    #[test]
    fn test_insert_timetable_stamps_parent_id_on_all_periods() {
        let manager = in_memory_manager();

        // 2 days with 2 and 3 periods.
        let doc = document(
            "CSY",
            vec![
                period("Monday", "09:00"),
                period("Monday", "10:00"),
                period("Tuesday", "09:00"),
                period("Tuesday", "10:00"),
                period("Tuesday", "11:00"),
            ],
        );

        let id = manager.insert_timetable(&doc).unwrap();

        assert_eq!(manager.timetable_count().unwrap(), 1);
        let periods = manager.get_periods_for_timetable(id).unwrap();
        assert_eq!(periods.len(), 5);
        assert!(periods.iter().all(|p| p.timetable_id == id));
    }

    #[test]
    fn test_insert_timetable_with_no_periods() {
        let manager = in_memory_manager();
        let id = manager.insert_timetable(&document("CSE", vec![])).unwrap();
        assert!(manager.get_periods_for_timetable(id).unwrap().is_empty());
    }

    #[test]
    fn test_failed_period_insert_rolls_back_parent() {
        let manager = in_memory_manager();

        // A weekend day violates the schema's weekday constraint.
        let doc = document("CSY", vec![period("Saturday", "09:00")]);
        let err = manager.insert_timetable(&doc).unwrap_err();
        assert!(matches!(err, PersistenceError::Database(_)));

        // Transactional write: the parent row must not survive.
        assert_eq!(manager.timetable_count().unwrap(), 0);
    }

    #[test]
    fn test_batch_aborts_at_first_failure() {
        let manager = in_memory_manager();

        let docs = vec![
            document("CSE", vec![period("Monday", "09:00")]),
            document("CSY", vec![period("Sunday", "09:00")]),
            document("ECE", vec![period("Friday", "09:00")]),
        ];

        let err = manager.insert_timetables(&docs).unwrap_err();
        assert!(matches!(err, PersistenceError::Database(_)));

        // Document 1 persisted; document 2 rolled back; document 3 never
        // attempted.
        assert_eq!(manager.timetable_count().unwrap(), 1);
        let first = manager.get_timetable(1).unwrap();
        assert_eq!(first.course_code, "CSE");
    }

    #[test]
    fn test_batch_returns_ids_in_input_order() {
        let manager = in_memory_manager();
        let docs = vec![document("CSE", vec![]), document("CSY", vec![])];
        let ids = manager.insert_timetables(&docs).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        assert_eq!(manager.get_timetable(ids[1]).unwrap().course_code, "CSY");
    }

    #[test]
    fn test_calendar_bulk_insert_round_trips_json_arrays() {
        let manager = in_memory_manager();
        let inserted = manager
            .insert_calendar_events(&[event("Independence Day"), event("Onam")])
            .unwrap();
        assert_eq!(inserted, 2);

        let rows = manager.get_all_events().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].batch, "[0]");
        assert_eq!(rows[0].semester, "[1,2,3,4,5,6,7,8]");
        assert_eq!(rows[1].event_name, "Onam");
    }

    #[test]
    fn test_calendar_insert_empty_batch_is_noop() {
        let manager = in_memory_manager();
        assert_eq!(manager.insert_calendar_events(&[]).unwrap(), 0);
        assert!(manager.get_all_events().unwrap().is_empty());
    }
}
