//! This module contains the command-line interface [`Cli`] parser, with one group of commands per
//! school role.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The command line configuration struct, where the command-line interface parser is automatically
/// derived by [`clap::Parser`].
#[derive(Parser, Debug)]
#[command(name = "school-attendance", version, about = "School attendance tracker")]
pub struct Cli {
    /// SQLite database to use instead of the configured one.
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage teachers, subjects, students, and timetables.
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Take attendance and view reports.
    #[command(subcommand)]
    Teacher(TeacherCommand),

    /// Check schedules and log your own attendance.
    #[command(subcommand)]
    Student(StudentCommand),
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Create a new teacher.
    CreateTeacher { name: String },

    /// Create a new subject taught by an existing teacher.
    CreateSubject { name: String, teacher_id: i32 },

    /// Add a new student to the roster.
    CreateStudent {
        name: String,
        grade: String,
        section: String,
    },

    /// Create a class timetable from alternating subject and teacher IDs, one pair per period.
    CreateTimetable {
        class_name: String,
        #[arg(required = true, num_args = 1..)]
        subject_teacher_ids: Vec<i32>,
    },

    /// Add every student from a CSV roster with `name,grade,section` columns.
    ImportStudents { file_path: PathBuf },

    /// List all teachers.
    ListTeachers,

    /// List all subjects.
    ListSubjects,

    /// List all students.
    ListStudents,

    /// Show a class timetable.
    ShowTimetable { class_name: String },
}

#[derive(Subcommand, Debug)]
pub enum TeacherCommand {
    /// Record a student as present, or absent with `--absent`.
    TakeAttendance {
        student_id: i32,
        subject_id: i32,
        #[arg(long)]
        absent: bool,
    },

    /// Show every attendance record for a subject.
    Report { subject_id: i32 },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Show the subjects on offer.
    Schedule { student_id: i32 },

    /// Mark yourself present for a subject.
    LogAttendance { student_id: i32, subject_id: i32 },
}
