use crate::db::ReferencePolicy;
use crate::error::{AttendanceError, Result};
use crate::models::{
    AttendanceId, DEFAULT_AVAILABLE_SESSIONS, MAX_PERIODS, NewAttendanceRecord, NewStudent,
    NewSubject, NewTeacher, NewTimetableEntry, ReportRow, ScheduleItem, Student, StudentId,
    Subject, SubjectId, Teacher, TeacherId, TimetableEntry, TimetableEntryId,
};
use crate::roster::RosterRow;
use crate::settings::Settings;
use crate::store::{SqliteStore, Store};
use chrono::Utc;
use log::{debug, info, warn};

/// The manager for recording and retrieving school and attendance data.
///
/// Every operation runs to completion against the injected [`Store`]; nothing is cached between
/// calls.
pub struct AttendanceManager<S = SqliteStore> {
    store: S,
    policy: ReferencePolicy,
}

impl AttendanceManager<SqliteStore> {
    /// Creates a new `AttendanceManager` backed by the SQLite database named in `settings`.
    pub fn connect(settings: &Settings) -> Result<Self> {
        let policy = settings.reference_policy();
        let store = SqliteStore::open(&settings.database.url, policy)?;

        Ok(Self::new(store, policy))
    }
}

impl<S: Store> AttendanceManager<S> {
    pub fn new(store: S, policy: ReferencePolicy) -> Self {
        Self { store, policy }
    }

    /// Adds a teacher with the default number of available sessions and returns its ID.
    pub fn create_teacher(&mut self, name: &str) -> Result<TeacherId> {
        let name = required("teacher name", name)?;

        let teacher_id = self.store.insert_teacher(&NewTeacher {
            name,
            available_sessions: DEFAULT_AVAILABLE_SESSIONS,
        })?;

        info!("event=create_teacher status=ok teacher_id={teacher_id}");
        Ok(teacher_id)
    }

    /// Adds a subject taught by `teacher_id` and returns its ID.
    pub fn create_subject(&mut self, name: &str, teacher_id: TeacherId) -> Result<SubjectId> {
        let name = required("subject name", name)?;
        self.ensure_teacher(teacher_id)?;

        let subject_id = self.store.insert_subject(&NewSubject { name, teacher_id })?;

        info!("event=create_subject status=ok subject_id={subject_id} teacher_id={teacher_id}");
        Ok(subject_id)
    }

    /// Adds a student to the roster and returns their ID.
    pub fn create_student(&mut self, name: &str, grade: &str, section: &str) -> Result<StudentId> {
        let student = NewStudent {
            name: required("student name", name)?,
            grade: required("grade", grade)?,
            section: required("section", section)?,
        };

        let student_id = self.store.insert_student(&student)?;

        info!("event=create_student status=ok student_id={student_id}");
        Ok(student_id)
    }

    /// Adds every student from a parsed roster. Either all rows are inserted or none are.
    pub fn import_students(&mut self, rows: &[RosterRow]) -> Result<Vec<StudentId>> {
        let new_students = rows
            .iter()
            .enumerate()
            .map(|(index, row)| -> Result<NewStudent<'_>> {
                let line = index + 1;
                Ok(NewStudent {
                    name: required(&format!("student name on roster row {line}"), &row.name)?,
                    grade: required(&format!("grade on roster row {line}"), &row.grade)?,
                    section: required(&format!("section on roster row {line}"), &row.section)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let ids = self.store.insert_students(&new_students)?;

        info!("event=import_students status=ok count={}", ids.len());
        Ok(ids)
    }

    /// Builds a class timetable from a flat sequence of alternating subject and teacher IDs, as
    /// collected from the per-period inputs: `[subject_1, teacher_1, subject_2, teacher_2, ...]`.
    pub fn create_timetable(
        &mut self,
        class_name: &str,
        subject_teacher_ids: &[i32],
    ) -> Result<Vec<TimetableEntryId>> {
        let pairs = pair_up(subject_teacher_ids)?;
        self.create_timetable_pairs(class_name, &pairs)
    }

    /// Builds a class timetable where the `n`th `(subject, teacher)` pair is taught in period `n`
    /// (1-indexed). All entries are stored together or not at all.
    pub fn create_timetable_pairs(
        &mut self,
        class_name: &str,
        pairs: &[(SubjectId, TeacherId)],
    ) -> Result<Vec<TimetableEntryId>> {
        let class_name = required("class name", class_name)?;

        if pairs.is_empty() {
            warn!("event=create_timetable status=rejected reason=empty");
            return Err(AttendanceError::Validation(format!(
                "timetable for class {class_name} needs at least one period"
            )));
        }

        if pairs.len() > MAX_PERIODS {
            warn!(
                "event=create_timetable status=rejected reason=too_many_periods count={}",
                pairs.len()
            );
            return Err(AttendanceError::Validation(format!(
                "timetable for class {class_name} has {} periods, at most {MAX_PERIODS} are allowed",
                pairs.len()
            )));
        }

        for &(subject_id, teacher_id) in pairs {
            self.ensure_subject(subject_id)?;
            self.ensure_teacher(teacher_id)?;
        }

        let entries: Vec<NewTimetableEntry> = pairs
            .iter()
            .zip(1..)
            .map(|(&(subject_id, teacher_id), period)| NewTimetableEntry {
                class_name,
                period,
                subject_id,
                teacher_id,
            })
            .collect();

        let ids = self.store.insert_timetable_entries(&entries)?;

        info!(
            "event=create_timetable status=ok class_name={class_name} periods={}",
            ids.len()
        );
        Ok(ids)
    }

    /// Records whether a student was present (`true`) or absent (`false`) for a subject, dated
    /// now.
    pub fn record_attendance(
        &mut self,
        student_id: StudentId,
        subject_id: SubjectId,
        status: bool,
    ) -> Result<AttendanceId> {
        self.ensure_student(student_id)?;
        self.ensure_subject(subject_id)?;

        let attendance_id = self.store.insert_attendance(&NewAttendanceRecord {
            student_id,
            subject_id,
            date: Utc::now().naive_utc(),
            status,
        })?;

        info!(
            "event=record_attendance status=ok attendance_id={attendance_id} student_id={student_id} subject_id={subject_id} present={status}"
        );
        Ok(attendance_id)
    }

    /// A student checking themselves in. Always records them as present.
    pub fn log_attendance(
        &mut self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> Result<AttendanceId> {
        self.record_attendance(student_id, subject_id, true)
    }

    /// Returns every attendance record for a subject, oldest first.
    pub fn generate_report(&mut self, subject_id: SubjectId) -> Result<Vec<ReportRow>> {
        let records = self.store.attendance_for_subject(subject_id)?;
        debug!(
            "event=generate_report subject_id={subject_id} rows={}",
            records.len()
        );

        Ok(records.into_iter().map(ReportRow::from).collect())
    }

    /// Returns the subjects on offer for a student.
    ///
    /// This lists every subject that has an existing teacher. It is not narrowed down to the
    /// student's grade or section; use [`AttendanceManager::class_timetable`] for that.
    pub fn check_schedule(&mut self, student_id: StudentId) -> Result<Vec<ScheduleItem>> {
        if self.store.find_student(student_id)?.is_none() {
            return Err(AttendanceError::NotFound {
                entity: "student",
                id: student_id,
            });
        }

        Ok(self
            .store
            .subjects_with_teachers()?
            .into_iter()
            .map(|(subject, teacher)| ScheduleItem {
                subject_id: subject.id,
                subject_name: subject.name,
                teacher_id: teacher.id,
                teacher_name: teacher.name,
            })
            .collect())
    }

    /// Returns a class's timetable, ordered by period.
    pub fn class_timetable(&mut self, class_name: &str) -> Result<Vec<TimetableEntry>> {
        let class_name = required("class name", class_name)?;
        self.store.timetable_for_class(class_name)
    }

    pub fn list_teachers(&mut self) -> Result<Vec<Teacher>> {
        self.store.teachers()
    }

    pub fn list_subjects(&mut self) -> Result<Vec<Subject>> {
        self.store.subjects()
    }

    pub fn list_students(&mut self) -> Result<Vec<Student>> {
        self.store.students()
    }

    fn ensure_teacher(&mut self, teacher_id: TeacherId) -> Result<()> {
        if self.policy.enforces() && self.store.find_teacher(teacher_id)?.is_none() {
            return Err(missing("teacher", teacher_id));
        }
        Ok(())
    }

    fn ensure_subject(&mut self, subject_id: SubjectId) -> Result<()> {
        if self.policy.enforces() && self.store.find_subject(subject_id)?.is_none() {
            return Err(missing("subject", subject_id));
        }
        Ok(())
    }

    fn ensure_student(&mut self, student_id: StudentId) -> Result<()> {
        if self.policy.enforces() && self.store.find_student(student_id)?.is_none() {
            return Err(missing("student", student_id));
        }
        Ok(())
    }
}

/// Groups a flat `[subject, teacher, subject, teacher, ...]` sequence into pairs.
pub fn pair_up(subject_teacher_ids: &[i32]) -> Result<Vec<(SubjectId, TeacherId)>> {
    if subject_teacher_ids.len() % 2 != 0 {
        return Err(AttendanceError::Validation(format!(
            "expected alternating subject and teacher IDs, got an odd count of {}",
            subject_teacher_ids.len()
        )));
    }

    Ok(subject_teacher_ids
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect())
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        warn!("event=validate status=rejected field={field:?}");
        return Err(AttendanceError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

fn missing(entity: &'static str, id: i32) -> AttendanceError {
    warn!("event=validate status=rejected missing={entity} id={id}");
    AttendanceError::MissingReference { entity, id }
}
