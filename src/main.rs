use anyhow::Result;
use clap::Parser;
use log::error;
use school_attendance::cli::{AdminCommand, Cli, Command, StudentCommand, TeacherCommand};
use school_attendance::error::Result as AttendanceResult;
use school_attendance::{AttendanceManager, display, settings};

fn run(manager: &mut AttendanceManager, command: Command) -> AttendanceResult<String> {
    match command {
        Command::Admin(command) => match command {
            AdminCommand::CreateTeacher { name } => display::create_teacher(manager, &name),
            AdminCommand::CreateSubject { name, teacher_id } => {
                display::create_subject(manager, &name, teacher_id)
            }
            AdminCommand::CreateStudent {
                name,
                grade,
                section,
            } => display::create_student(manager, &name, &grade, &section),
            AdminCommand::CreateTimetable {
                class_name,
                subject_teacher_ids,
            } => display::create_timetable(manager, &class_name, &subject_teacher_ids),
            AdminCommand::ImportStudents { file_path } => {
                display::import_students(manager, &file_path)
            }
            AdminCommand::ListTeachers => display::list_teachers(manager),
            AdminCommand::ListSubjects => display::list_subjects(manager),
            AdminCommand::ListStudents => display::list_students(manager),
            AdminCommand::ShowTimetable { class_name } => {
                display::show_timetable(manager, &class_name)
            }
        },
        Command::Teacher(command) => match command {
            TeacherCommand::TakeAttendance {
                student_id,
                subject_id,
                absent,
            } => display::take_attendance(manager, student_id, subject_id, !absent),
            TeacherCommand::Report { subject_id } => display::generate_report(manager, subject_id),
        },
        Command::Student(command) => match command {
            StudentCommand::Schedule { student_id } => display::check_schedule(manager, student_id),
            StudentCommand::LogAttendance {
                student_id,
                subject_id,
            } => display::log_attendance(manager, student_id, subject_id),
        },
    }
}

fn main() -> Result<()> {
    settings::load_dotenv();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let mut manager = school_attendance::create_default_manager(cli.database.as_deref())?;

    match run(&mut manager, cli.command) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            error!("command failed: {err}");
            Err(err.into())
        }
    }
}
