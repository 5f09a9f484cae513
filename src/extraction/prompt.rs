//! Extraction prompts.
//!
//! The prompt text is the only schema contract the model sees: the expected
//! JSON shape, the field conventions, and the formatting rules all live
//! here. The normalizer checks that the output is JSON, nothing more.

/// Instruction for timetable images. One upload may contain several
/// timetables (e.g. a combined sheet per batch), so the model is asked for
/// an array even when only one document is present.
pub const TIMETABLE_PROMPT: &str = r#"You are an AI assistant. Extract timetable information from the document below and return ONLY a valid JSON array of timetable objects in this exact structure (NO explanations, NO extra text):

[
  {
    "semester": 5,
    "course": "Computer Science and Engineering",
    "batch": 1,
    "academicYear": "2025",
    "timetable": [
      {
        "day": "Monday",
        "periods": [
          {
            "startTime": "09:00",
            "endTime": "09:55",
            "subject": {
              "code": "IHS313",
              "name": "Human Resource Management",
              "type": "Theory"
            },
            "faculty": "Dr. Mathew C.D"
          }
        ]
      }
    ]
  }
]

## Points to Note:
1. Lab periods are always 2 hours (e.g., 09:00 - 11:00 -> split into two 1-hour slots).
2. Timetable is only for Monday to Friday.
3. All text values must be in title case (first letter capitalized).
4. Return one object per distinct timetable found in the document.
5. DO NOT wrap the response in markdown or code fences."#;

/// Instruction for academic calendar PDFs.
pub const CALENDAR_PROMPT: &str = r#"You are an AI assistant. Extract all events from the academic calendar document below.
Return ONLY a valid JSON array of events in this exact structure (NO explanations, NO extra text):

[
  {
    "date": "12 Aug 2025",
    "eventName": "Independence Day",
    "source": "acadCalendar",
    "batch": [0],
    "semester": [1,2,3,4,5,6,7,8],
    "type": "holiday"
  }
]

## Important Instructions:
1. The 'source' field must always be "acadCalendar" (ENUM: "acadCalendar", "email", "adminEntry").
2. The 'batch' field should always be [0], meaning all batches.
3. The 'semester' field should be an array of integers representing the affected semesters.
4. The 'type' field is a string describing the type of event (e.g., "holiday", "exam", "activity", "deadline", "other").
5. Dates must be in "DD MMM YYYY" format (e.g., 12 Aug 2025).
6. If start and end times are mentioned, include them; otherwise, leave them null.
7. Return all events in a single JSON array.
8. DO NOT wrap the response in markdown, code fences, or any extra text."#;
