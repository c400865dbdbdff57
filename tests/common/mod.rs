#![allow(dead_code)]

use school_attendance::{AttendanceManager, ReferencePolicy, SqliteStore};

pub fn manager() -> AttendanceManager {
    manager_with(ReferencePolicy::Enforce)
}

pub fn lenient_manager() -> AttendanceManager {
    manager_with(ReferencePolicy::Lenient)
}

pub fn manager_with(policy: ReferencePolicy) -> AttendanceManager {
    let store = SqliteStore::open_in_memory(policy).unwrap();
    AttendanceManager::new(store, policy)
}

/// A teacher who teaches one subject, and one student.
pub struct Seed {
    pub teacher_id: i32,
    pub subject_id: i32,
    pub student_id: i32,
}

pub fn seed(manager: &mut AttendanceManager) -> Seed {
    let teacher_id = manager.create_teacher("Ms. Frizzle").unwrap();
    let subject_id = manager.create_subject("Science", teacher_id).unwrap();
    let student_id = manager.create_student("Arnold", "10", "A").unwrap();

    Seed {
        teacher_id,
        subject_id,
        student_id,
    }
}
