//! Persistence for the five school entities.
//!
//! [`Store`] is the seam the domain operations talk to; [`SqliteStore`] is the diesel-backed
//! implementation. Every method is a single auto-committed statement, except the batch inserts,
//! which commit all of their rows together or none of them.

use crate::db::{self, ReferencePolicy};
use crate::error::Result;
use crate::models::{
    AttendanceId, AttendanceRecord, NewAttendanceRecord, NewStudent, NewSubject, NewTeacher,
    NewTimetableEntry, Student, StudentId, Subject, SubjectId, Teacher, TeacherId, TimetableEntry,
    TimetableEntryId,
};
use crate::schema;
use diesel::prelude::*;

pub trait Store {
    fn insert_teacher(&mut self, teacher: &NewTeacher<'_>) -> Result<TeacherId>;

    fn insert_subject(&mut self, subject: &NewSubject<'_>) -> Result<SubjectId>;

    fn insert_student(&mut self, student: &NewStudent<'_>) -> Result<StudentId>;

    /// Inserts all of `students`, or none of them if any insert fails.
    fn insert_students(&mut self, students: &[NewStudent<'_>]) -> Result<Vec<StudentId>>;

    fn insert_attendance(&mut self, record: &NewAttendanceRecord) -> Result<AttendanceId>;

    /// Inserts all of `entries`, or none of them if any insert fails.
    fn insert_timetable_entries(
        &mut self,
        entries: &[NewTimetableEntry<'_>],
    ) -> Result<Vec<TimetableEntryId>>;

    fn find_teacher(&mut self, teacher_id: TeacherId) -> Result<Option<Teacher>>;

    fn find_subject(&mut self, subject_id: SubjectId) -> Result<Option<Subject>>;

    fn find_student(&mut self, student_id: StudentId) -> Result<Option<Student>>;

    /// All teachers, in id order.
    fn teachers(&mut self) -> Result<Vec<Teacher>>;

    /// All subjects, in id order.
    fn subjects(&mut self) -> Result<Vec<Subject>>;

    /// All students, in id order.
    fn students(&mut self) -> Result<Vec<Student>>;

    /// Every subject paired with its teacher, in subject id order. Subjects whose teacher does
    /// not exist are left out.
    fn subjects_with_teachers(&mut self) -> Result<Vec<(Subject, Teacher)>>;

    /// Attendance records for one subject, in insertion order.
    fn attendance_for_subject(&mut self, subject_id: SubjectId) -> Result<Vec<AttendanceRecord>>;

    /// Timetable entries for one class, ordered by period.
    fn timetable_for_class(&mut self, class_name: &str) -> Result<Vec<TimetableEntry>>;
}

/// A [`Store`] backed by a single SQLite connection.
pub struct SqliteStore {
    db: SqliteConnection,
}

impl SqliteStore {
    /// Opens the database at `url`, creating and migrating it as needed.
    pub fn open(url: &str, policy: ReferencePolicy) -> Result<Self> {
        Ok(Self {
            db: db::open_db(url, policy)?,
        })
    }

    /// Opens a fresh, private in-memory database.
    pub fn open_in_memory(policy: ReferencePolicy) -> Result<Self> {
        Ok(Self {
            db: db::open_db_in_memory(policy)?,
        })
    }

    /// Gives direct access to the underlying connection.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.db
    }
}

impl Store for SqliteStore {
    fn insert_teacher(&mut self, teacher: &NewTeacher<'_>) -> Result<TeacherId> {
        use schema::teachers::dsl::*;

        Ok(diesel::insert_into(teachers)
            .values(teacher)
            .returning(id)
            .get_result(&mut self.db)?)
    }

    fn insert_subject(&mut self, subject: &NewSubject<'_>) -> Result<SubjectId> {
        use schema::subjects::dsl::*;

        Ok(diesel::insert_into(subjects)
            .values(subject)
            .returning(id)
            .get_result(&mut self.db)?)
    }

    fn insert_student(&mut self, student: &NewStudent<'_>) -> Result<StudentId> {
        use schema::students::dsl::*;

        Ok(diesel::insert_into(students)
            .values(student)
            .returning(id)
            .get_result(&mut self.db)?)
    }

    fn insert_students(&mut self, new_students: &[NewStudent<'_>]) -> Result<Vec<StudentId>> {
        use schema::students::dsl::*;

        let ids = self.db.transaction(|conn| {
            new_students
                .iter()
                .map(|student| {
                    diesel::insert_into(students)
                        .values(student)
                        .returning(id)
                        .get_result::<StudentId>(conn)
                })
                .collect::<QueryResult<Vec<_>>>()
        })?;

        Ok(ids)
    }

    fn insert_attendance(&mut self, record: &NewAttendanceRecord) -> Result<AttendanceId> {
        use schema::attendance::dsl::*;

        Ok(diesel::insert_into(attendance)
            .values(record)
            .returning(id)
            .get_result(&mut self.db)?)
    }

    fn insert_timetable_entries(
        &mut self,
        entries: &[NewTimetableEntry<'_>],
    ) -> Result<Vec<TimetableEntryId>> {
        use schema::timetables::dsl::*;

        let ids = self.db.transaction(|conn| {
            entries
                .iter()
                .map(|entry| {
                    diesel::insert_into(timetables)
                        .values(entry)
                        .returning(id)
                        .get_result::<TimetableEntryId>(conn)
                })
                .collect::<QueryResult<Vec<_>>>()
        })?;

        Ok(ids)
    }

    fn find_teacher(&mut self, teacher_id: TeacherId) -> Result<Option<Teacher>> {
        use schema::teachers::dsl::*;

        Ok(teachers
            .find(teacher_id)
            .select(Teacher::as_select())
            .first(&mut self.db)
            .optional()?)
    }

    fn find_subject(&mut self, subject_id: SubjectId) -> Result<Option<Subject>> {
        use schema::subjects::dsl::*;

        Ok(subjects
            .find(subject_id)
            .select(Subject::as_select())
            .first(&mut self.db)
            .optional()?)
    }

    fn find_student(&mut self, student_id: StudentId) -> Result<Option<Student>> {
        use schema::students::dsl::*;

        Ok(students
            .find(student_id)
            .select(Student::as_select())
            .first(&mut self.db)
            .optional()?)
    }

    fn teachers(&mut self) -> Result<Vec<Teacher>> {
        use schema::teachers::dsl::*;

        Ok(teachers
            .order(id.asc())
            .select(Teacher::as_select())
            .load(&mut self.db)?)
    }

    fn subjects(&mut self) -> Result<Vec<Subject>> {
        use schema::subjects::dsl::*;

        Ok(subjects
            .order(id.asc())
            .select(Subject::as_select())
            .load(&mut self.db)?)
    }

    fn students(&mut self) -> Result<Vec<Student>> {
        use schema::students::dsl::*;

        Ok(students
            .order(id.asc())
            .select(Student::as_select())
            .load(&mut self.db)?)
    }

    fn subjects_with_teachers(&mut self) -> Result<Vec<(Subject, Teacher)>> {
        use schema::{subjects, teachers};

        Ok(subjects::table
            .inner_join(teachers::table)
            .order(subjects::id.asc())
            .select((Subject::as_select(), Teacher::as_select()))
            .load(&mut self.db)?)
    }

    fn attendance_for_subject(
        &mut self,
        wanted_subject: SubjectId,
    ) -> Result<Vec<AttendanceRecord>> {
        use schema::attendance::dsl::*;

        Ok(attendance
            .filter(subject_id.eq(wanted_subject))
            .order(id.asc())
            .select(AttendanceRecord::as_select())
            .load(&mut self.db)?)
    }

    fn timetable_for_class(&mut self, wanted_class: &str) -> Result<Vec<TimetableEntry>> {
        use schema::timetables::dsl::*;

        Ok(timetables
            .filter(class_name.eq(wanted_class))
            .order((period.asc(), id.asc()))
            .select(TimetableEntry::as_select())
            .load(&mut self.db)?)
    }
}
