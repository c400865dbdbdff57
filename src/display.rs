//! Renders the result of each domain operation as the text shown to the user.

use crate::error::{AttendanceError, Result};
use crate::manager::AttendanceManager;
use crate::models::{StudentId, SubjectId, TeacherId};
use crate::roster;
use crate::store::Store;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

fn render_table<T: Tabled>(title: &str, rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());

    format!("{title}:\n{table}")
}

pub fn create_teacher<S: Store>(manager: &mut AttendanceManager<S>, name: &str) -> Result<String> {
    let id = manager.create_teacher(name)?;
    Ok(format!("Teacher {} created with ID {id}", name.trim()))
}

pub fn create_subject<S: Store>(
    manager: &mut AttendanceManager<S>,
    name: &str,
    teacher_id: TeacherId,
) -> Result<String> {
    let id = manager.create_subject(name, teacher_id)?;
    Ok(format!(
        "Subject {} created with ID {id} and assigned to teacher ID {teacher_id}",
        name.trim()
    ))
}

pub fn create_student<S: Store>(
    manager: &mut AttendanceManager<S>,
    name: &str,
    grade: &str,
    section: &str,
) -> Result<String> {
    let id = manager.create_student(name, grade, section)?;
    Ok(format!("Student {} created with ID {id}", name.trim()))
}

pub fn create_timetable<S: Store>(
    manager: &mut AttendanceManager<S>,
    class_name: &str,
    subject_teacher_ids: &[i32],
) -> Result<String> {
    let ids = manager.create_timetable(class_name, subject_teacher_ids)?;
    Ok(format!(
        "Timetable created for class {} with {} periods",
        class_name.trim(),
        ids.len()
    ))
}

pub fn import_students<S: Store>(
    manager: &mut AttendanceManager<S>,
    file_path: &Path,
) -> Result<String> {
    let rows = roster::read_roster_file(file_path)?;
    let ids = manager.import_students(&rows)?;

    Ok(format!(
        "Imported {} students from {}",
        ids.len(),
        file_path.display()
    ))
}

pub fn list_teachers<S: Store>(manager: &mut AttendanceManager<S>) -> Result<String> {
    Ok(render_table("Teachers", manager.list_teachers()?))
}

pub fn list_subjects<S: Store>(manager: &mut AttendanceManager<S>) -> Result<String> {
    Ok(render_table("Subjects", manager.list_subjects()?))
}

pub fn list_students<S: Store>(manager: &mut AttendanceManager<S>) -> Result<String> {
    Ok(render_table("Students", manager.list_students()?))
}

pub fn show_timetable<S: Store>(
    manager: &mut AttendanceManager<S>,
    class_name: &str,
) -> Result<String> {
    let entries = manager.class_timetable(class_name)?;
    if entries.is_empty() {
        return Ok(format!("No timetable for class {}", class_name.trim()));
    }

    Ok(render_table(
        &format!("Timetable for class {}", class_name.trim()),
        entries,
    ))
}

pub fn take_attendance<S: Store>(
    manager: &mut AttendanceManager<S>,
    student_id: StudentId,
    subject_id: SubjectId,
    status: bool,
) -> Result<String> {
    manager.record_attendance(student_id, subject_id, status)?;
    Ok(format!(
        "Attendance recorded for student ID {student_id} in subject ID {subject_id} with status {status}"
    ))
}

pub fn generate_report<S: Store>(
    manager: &mut AttendanceManager<S>,
    subject_id: SubjectId,
) -> Result<String> {
    let rows = manager.generate_report(subject_id)?;
    if rows.is_empty() {
        return Ok(format!("No attendance recorded for subject ID {subject_id}"));
    }

    Ok(render_table(
        &format!("Attendance for subject ID {subject_id}"),
        rows,
    ))
}

/// Renders a student's schedule, or "Student not found" when the ID is unknown.
pub fn check_schedule<S: Store>(
    manager: &mut AttendanceManager<S>,
    student_id: StudentId,
) -> Result<String> {
    match manager.check_schedule(student_id) {
        Ok(items) => Ok(render_table("Schedule", items)),
        Err(AttendanceError::NotFound { .. }) => Ok("Student not found".to_string()),
        Err(err) => Err(err),
    }
}

pub fn log_attendance<S: Store>(
    manager: &mut AttendanceManager<S>,
    student_id: StudentId,
    subject_id: SubjectId,
) -> Result<String> {
    manager.log_attendance(student_id, subject_id)?;
    Ok(format!(
        "Attendance logged for student ID {student_id} in subject ID {subject_id}"
    ))
}
