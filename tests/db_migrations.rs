use diesel::connection::SimpleConnection;
use diesel::Connection;
use school_attendance::db::migrations::{current_version, latest_version};
use school_attendance::db::{open_db, open_db_in_memory};
use school_attendance::{AttendanceError, AttendanceManager, ReferencePolicy, SqliteStore};
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> String {
    dir.path().join("school.db").to_string_lossy().into_owned()
}

#[test]
fn fresh_database_is_fully_migrated() {
    let mut conn = open_db_in_memory(ReferencePolicy::Enforce).unwrap();

    assert_eq!(current_version(&mut conn).unwrap(), latest_version());
}

#[test]
fn reopening_a_database_keeps_its_data() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    let (teacher_id, subject_id, student_id) = {
        let store = SqliteStore::open(&path, ReferencePolicy::Enforce).unwrap();
        let mut manager = AttendanceManager::new(store, ReferencePolicy::Enforce);
        let teacher_id = manager.create_teacher("Mr. Feeny").unwrap();
        let subject_id = manager.create_subject("English", teacher_id).unwrap();
        let student_id = manager.create_student("Cory", "7", "A").unwrap();
        manager.log_attendance(student_id, subject_id).unwrap();
        manager
            .create_timetable("7A", &[subject_id, teacher_id])
            .unwrap();
        (teacher_id, subject_id, student_id)
    };

    let store = SqliteStore::open(&path, ReferencePolicy::Enforce).unwrap();
    let mut manager = AttendanceManager::new(store, ReferencePolicy::Enforce);

    assert_eq!(manager.list_teachers().unwrap()[0].id, teacher_id);
    assert_eq!(manager.list_students().unwrap()[0].id, student_id);
    assert_eq!(manager.generate_report(subject_id).unwrap().len(), 1);
    assert_eq!(manager.class_timetable("7A").unwrap().len(), 1);

    let mut conn = open_db(&path, ReferencePolicy::Enforce).unwrap();
    assert_eq!(current_version(&mut conn).unwrap(), latest_version());
}

#[test]
fn sqlite_url_prefix_is_accepted() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:///{}", db_path(&dir));

    let store = SqliteStore::open(&url, ReferencePolicy::Enforce).unwrap();
    let mut manager = AttendanceManager::new(store, ReferencePolicy::Enforce);
    manager.create_teacher("Mr. Turner").unwrap();

    assert!(dir.path().join("school.db").exists());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    {
        let mut conn = open_db(&path, ReferencePolicy::Enforce).unwrap();
        conn.batch_execute(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = open_db(&path, ReferencePolicy::Enforce)
        .err()
        .expect("opening a newer schema should fail");
    assert!(matches!(
        err,
        AttendanceError::UnsupportedSchemaVersion { found, supported }
            if found == latest_version() + 1 && supported == latest_version()
    ));
}

#[test]
fn enforced_connections_reject_dangling_foreign_keys() {
    let mut conn = open_db_in_memory(ReferencePolicy::Enforce).unwrap();

    let result = conn.batch_execute("INSERT INTO subjects (name, teacher_id) VALUES ('Maths', 7);");

    assert!(result.is_err());
}

#[test]
fn lenient_connections_accept_dangling_foreign_keys() {
    let mut store = SqliteStore::open_in_memory(ReferencePolicy::Lenient).unwrap();

    store
        .connection()
        .batch_execute("INSERT INTO subjects (name, teacher_id) VALUES ('Maths', 7);")
        .unwrap();

    let mut manager = AttendanceManager::new(store, ReferencePolicy::Lenient);
    let subjects = manager.list_subjects().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].teacher_id, 7);
}

#[test]
fn period_outside_school_day_is_rejected_by_schema() {
    let mut conn = open_db_in_memory(ReferencePolicy::Lenient).unwrap();

    let result = conn.batch_execute(
        "INSERT INTO timetables (class_name, period, subject_id, teacher_id) VALUES ('10A', 10, 1, 1);",
    );

    assert!(result.is_err());
}

#[test]
fn unversioned_database_with_existing_tables_is_adopted() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    {
        let mut conn = diesel::SqliteConnection::establish(&path).unwrap();
        conn.batch_execute(
            "CREATE TABLE teachers (
                 id INTEGER NOT NULL,
                 name VARCHAR,
                 available_sessions INTEGER,
                 PRIMARY KEY (id)
             );
             CREATE INDEX ix_teachers_id ON teachers (id);
             CREATE INDEX ix_teachers_name ON teachers (name);
             INSERT INTO teachers (name, available_sessions) VALUES ('Mr. Hand', 9);",
        )
        .unwrap();
    }

    let store = SqliteStore::open(&path, ReferencePolicy::Enforce).unwrap();
    let mut manager = AttendanceManager::new(store, ReferencePolicy::Enforce);
    let new_teacher = manager.create_teacher("Ms. Darbus").unwrap();

    let names: Vec<String> = manager
        .list_teachers()
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Mr. Hand", "Ms. Darbus"]);
    assert_eq!(new_teacher, 2);

    let mut conn = open_db(&path, ReferencePolicy::Enforce).unwrap();
    assert_eq!(current_version(&mut conn).unwrap(), latest_version());
}
