use chrono::{TimeZone, Utc};
use planbook_core::repo::wire::{MeetingRow, NoteRow, TaskRow};
use planbook_core::{
    Category, InMemoryRepository, Meeting, MeetingStatus, Note, Priority, RepoError, Task,
    ValidationError, WireError, WireSnapshot,
};
use serde_json::json;

#[test]
fn task_row_falls_back_to_name_and_defaults() {
    let row: TaskRow = serde_json::from_value(json!({
        "Id": 3,
        "Name": "Pay rent",
        "title_c": "",
        "due_date_c": "2026-07-01",
        "CreatedOn": "2026-06-01T08:00:00Z"
    }))
    .unwrap();

    let task = Task::try_from(row).unwrap();
    assert_eq!(task.title, "Pay rent");
    assert_eq!(task.priority, Some(Priority::Medium));
    assert_eq!(task.category, Some(Category::Personal));
    assert!(!task.completed);
    assert_eq!(
        task.due_date,
        Some(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        task.created_at,
        Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
    );
}

#[test]
fn unknown_priority_decodes_to_unset() {
    let row: TaskRow = serde_json::from_value(json!({
        "Id": 1,
        "title_c": "odd",
        "priority_c": "urgent",
        "category_c": "work",
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();

    let task = Task::try_from(row).unwrap();
    assert_eq!(task.priority, None);
    assert_eq!(task.category, Some(Category::Work));
}

#[test]
fn task_without_any_title_is_rejected() {
    let row: TaskRow = serde_json::from_value(json!({
        "Id": 9,
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();

    assert_eq!(
        Task::try_from(row).unwrap_err(),
        WireError::MissingField { id: 9, field: "title_c" }
    );
}

#[test]
fn note_row_splits_joined_tags_and_uses_modified_on() {
    let row: NoteRow = serde_json::from_value(json!({
        "Id": 4,
        "title_c": "Ideas",
        "content_c": "things",
        "tags_c": "Work, ideas ,work",
        "CreatedOn": "2026-05-01T00:00:00Z",
        "ModifiedOn": "2026-05-03T12:00:00Z"
    }))
    .unwrap();

    let note = Note::try_from(row).unwrap();
    assert_eq!(note.tags, vec!["work", "ideas"]);
    assert_eq!(
        note.updated_at,
        Some(Utc.with_ymd_and_hms(2026, 5, 3, 12, 0, 0).unwrap())
    );
}

#[test]
fn meeting_row_accepts_list_participants_and_defaults_duration() {
    let row: MeetingRow = serde_json::from_value(json!({
        "Id": 2,
        "Name": "Standup",
        "datetime_c": "2026-06-15T09:30",
        "duration_c": 0,
        "participants_c": ["ana", " bo "],
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();

    let meeting = Meeting::try_from(row).unwrap();
    assert_eq!(meeting.title, "Standup");
    assert_eq!(meeting.duration, 60);
    assert_eq!(meeting.participants, vec!["ana", "bo"]);
    assert_eq!(meeting.status, MeetingStatus::Upcoming);
    assert_eq!(
        meeting.datetime,
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 30, 0).unwrap()
    );
}

#[test]
fn meeting_row_drops_repeated_participants_before_seeding() {
    let row: MeetingRow = serde_json::from_value(json!({
        "Id": 8,
        "title_c": "Planning",
        "datetime_c": "2026-06-15T09:30:00Z",
        "participants_c": "ana, bo, ana",
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();

    let meeting = Meeting::try_from(row).unwrap();
    assert_eq!(meeting.participants, vec!["ana", "bo"]);

    let repo = InMemoryRepository::from_records(vec![meeting]).unwrap();
    assert_eq!(repo.records()[0].participants, vec!["ana", "bo"]);
}

#[test]
fn seeding_rejects_meeting_with_repeated_participant() {
    let row: MeetingRow = serde_json::from_value(json!({
        "Id": 8,
        "title_c": "Planning",
        "datetime_c": "2026-06-15T09:30:00Z",
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();
    let mut meeting = Meeting::try_from(row).unwrap();
    meeting.participants = vec!["ana".to_string(), "ana".to_string()];

    assert_eq!(
        InMemoryRepository::from_records(vec![meeting]).unwrap_err(),
        RepoError::Validation(ValidationError::DuplicateParticipant)
    );
}

#[test]
fn note_row_without_content_names_the_row() {
    let snapshot: WireSnapshot = serde_json::from_value(json!({
        "notes": [
            { "Id": 1, "title_c": "Kept", "content_c": "body",
              "created_at_c": "2026-05-01T00:00:00Z" },
            { "Id": 2, "title_c": "Empty", "content_c": "  ",
              "created_at_c": "2026-05-01T00:00:00Z" }
        ]
    }))
    .unwrap();

    assert_eq!(
        snapshot.decode().unwrap_err(),
        WireError::MissingField { id: 2, field: "content_c" }
    );

    let missing: NoteRow = serde_json::from_value(json!({
        "Id": 3,
        "title_c": "No body",
        "created_at_c": "2026-05-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(
        Note::try_from(missing).unwrap_err(),
        WireError::MissingField { id: 3, field: "content_c" }
    );
}

#[test]
fn meeting_row_rejects_unknown_status_and_missing_datetime() {
    let bad_status: MeetingRow = serde_json::from_value(json!({
        "Id": 5,
        "title_c": "x",
        "datetime_c": "2026-06-15T09:30:00Z",
        "status_c": "postponed",
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();
    assert_eq!(
        Meeting::try_from(bad_status).unwrap_err(),
        WireError::InvalidValue {
            id: 5,
            field: "status_c",
            value: "postponed".to_string(),
        }
    );

    let undated: MeetingRow = serde_json::from_value(json!({
        "Id": 6,
        "title_c": "x",
        "created_at_c": "2026-06-01T08:00:00Z"
    }))
    .unwrap();
    assert_eq!(
        Meeting::try_from(undated).unwrap_err(),
        WireError::MissingField { id: 6, field: "datetime_c" }
    );
}

#[test]
fn encoded_row_decodes_to_same_record() {
    let row: NoteRow = serde_json::from_value(json!({
        "Id": 7,
        "title_c": "Plan",
        "content_c": "body",
        "tags_c": ["q3"],
        "created_at_c": "2026-05-01T00:00:00Z"
    }))
    .unwrap();
    let note = Note::try_from(row).unwrap();

    let encoded = serde_json::to_value(NoteRow::from(&note)).unwrap();
    assert_eq!(encoded["Name"], "Plan");
    assert_eq!(encoded["tags_c"], "q3");
    let decoded: NoteRow = serde_json::from_value(encoded).unwrap();
    assert_eq!(Note::try_from(decoded).unwrap(), note);
}

#[test]
fn snapshot_decodes_and_seeds_repositories() {
    let snapshot: WireSnapshot = serde_json::from_value(json!({
        "tasks": [
            { "Id": 1, "title_c": "a", "created_at_c": "2026-06-01T08:00:00Z" },
            { "Id": 5, "title_c": "b", "completed_c": true, "created_at_c": "2026-06-02T08:00:00Z" }
        ],
        "meetings": [
            { "Id": 1, "title_c": "m", "datetime_c": "2026-06-15T09:00:00Z",
              "status_c": "in-progress", "created_at_c": "2026-06-01T08:00:00Z" }
        ]
    }))
    .unwrap();

    let decoded = snapshot.decode().unwrap();
    assert_eq!(decoded.tasks.len(), 2);
    assert!(decoded.notes.is_empty());
    assert_eq!(decoded.meetings[0].status, MeetingStatus::InProgress);

    let repo = InMemoryRepository::<Task>::from_records(decoded.tasks).unwrap();
    assert_eq!(repo.len(), 2);
    assert!(repo.records()[1].completed);
}
