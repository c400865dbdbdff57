use crate::schema::{attendance, students, subjects, teachers, timetables};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use tabled::Tabled;

pub type TeacherId = i32;
pub type SubjectId = i32;
pub type StudentId = i32;
pub type AttendanceId = i32;
pub type TimetableEntryId = i32;

/// The number of sessions a newly created teacher is available for.
pub const DEFAULT_AVAILABLE_SESSIONS: i32 = 9;

/// The number of periods in a school day. Periods are numbered `1..=MAX_PERIODS`.
pub const MAX_PERIODS: usize = 9;

#[derive(Queryable, Selectable, Tabled, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub available_sessions: i32,
}

#[derive(Insertable)]
#[diesel(table_name = teachers)]
pub struct NewTeacher<'a> {
    pub name: &'a str,
    pub available_sessions: i32,
}

#[derive(Queryable, Selectable, Tabled, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub teacher_id: TeacherId,
}

#[derive(Insertable)]
#[diesel(table_name = subjects)]
pub struct NewSubject<'a> {
    pub name: &'a str,
    pub teacher_id: TeacherId,
}

#[derive(Queryable, Selectable, Tabled, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub grade: String,
    pub section: String,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = students)]
pub struct NewStudent<'a> {
    pub name: &'a str,
    pub grade: &'a str,
    pub section: &'a str,
}

/// A single (student, subject, date, status) observation. `status` is `true` for present.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub date: NaiveDateTime,
    pub status: bool,
}

#[derive(Insertable)]
#[diesel(table_name = attendance)]
pub struct NewAttendanceRecord {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub date: NaiveDateTime,
    pub status: bool,
}

#[derive(Queryable, Selectable, Tabled, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = timetables)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimetableEntry {
    pub id: TimetableEntryId,
    pub class_name: String,
    pub period: i32,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}

#[derive(Insertable)]
#[diesel(table_name = timetables)]
pub struct NewTimetableEntry<'a> {
    pub class_name: &'a str,
    pub period: i32,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}

/// One line of a subject's attendance report.
#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    #[tabled(rename = "student id")]
    pub student_id: StudentId,
    pub date: NaiveDateTime,
    pub status: bool,
}

impl From<AttendanceRecord> for ReportRow {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            student_id: record.student_id,
            date: record.date,
            status: record.status,
        }
    }
}

/// One line of a student's schedule.
#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    #[tabled(rename = "subject id")]
    pub subject_id: SubjectId,
    #[tabled(rename = "subject")]
    pub subject_name: String,
    #[tabled(rename = "teacher id")]
    pub teacher_id: TeacherId,
    #[tabled(rename = "teacher")]
    pub teacher_name: String,
}
