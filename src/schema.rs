// Mirrors `src/db/migrations/0001_init.sql`.

diesel::table! {
    teachers (id) {
        id -> Integer,
        name -> Text,
        available_sessions -> Integer,
    }
}

diesel::table! {
    subjects (id) {
        id -> Integer,
        name -> Text,
        teacher_id -> Integer,
    }
}

diesel::table! {
    students (id) {
        id -> Integer,
        name -> Text,
        grade -> Text,
        section -> Text,
    }
}

diesel::table! {
    attendance (id) {
        id -> Integer,
        student_id -> Integer,
        subject_id -> Integer,
        date -> Timestamp,
        status -> Bool,
    }
}

diesel::table! {
    timetables (id) {
        id -> Integer,
        class_name -> Text,
        period -> Integer,
        subject_id -> Integer,
        teacher_id -> Integer,
    }
}

diesel::joinable!(subjects -> teachers (teacher_id));
diesel::joinable!(attendance -> students (student_id));
diesel::joinable!(attendance -> subjects (subject_id));
diesel::joinable!(timetables -> subjects (subject_id));
diesel::joinable!(timetables -> teachers (teacher_id));

diesel::allow_tables_to_appear_in_same_query!(
    attendance,
    students,
    subjects,
    teachers,
    timetables,
);
