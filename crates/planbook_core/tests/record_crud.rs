use chrono::{DateTime, Duration, TimeZone, Utc};
use planbook_core::{
    DashboardService, EffectiveStatus, InMemoryRepository, Meeting, MeetingDraft, MeetingFilter,
    MeetingService, MeetingStatus, Note, NoteDraft, NoteFilter, NoteService, Priority,
    RecordRepository, RepoError, ServiceError, Task, TaskDraft, TaskFilter, TaskService,
    ValidationError,
};

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap()
}

fn later_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 2, 8, 0, 0).unwrap()
}

#[test]
fn create_assigns_sequential_ids_and_bumps_version() {
    let mut repo = InMemoryRepository::<Task>::with_clock(fixed_clock);

    let first = repo.create(TaskDraft::new("first")).unwrap();
    let second = repo.create(TaskDraft::new("second")).unwrap();

    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(first.created_at, fixed_clock());
    assert_eq!(repo.version(), 2);
    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn seeded_repository_allocates_above_max_id() {
    let mut seed = InMemoryRepository::<Task>::with_clock(fixed_clock);
    let mut existing = seed.create(TaskDraft::new("seed")).unwrap();
    existing.id = 41;

    let mut repo = InMemoryRepository::from_records(vec![existing]).unwrap();
    let created = repo.create(TaskDraft::new("next")).unwrap();
    assert_eq!(created.id, 42);
}

#[test]
fn seeding_rejects_duplicate_ids() {
    let mut seed = InMemoryRepository::<Task>::with_clock(fixed_clock);
    let task = seed.create(TaskDraft::new("dup")).unwrap();

    let err = InMemoryRepository::from_records(vec![task.clone(), task]).unwrap_err();
    assert_eq!(err, RepoError::DuplicateId { kind: "task", id: 1 });
}

#[test]
fn update_preserves_identity_and_created_at() {
    let mut repo = InMemoryRepository::<Note>::with_clock(fixed_clock);
    let created = repo.create(NoteDraft::new("title", "body")).unwrap();

    repo.set_clock(later_clock);
    let mut draft = created.to_draft();
    draft.content = "edited".to_string();
    let updated = repo.update(created.id, draft).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, fixed_clock());
    assert_eq!(updated.updated_at, Some(later_clock()));
    assert_eq!(updated.content, "edited");
}

#[test]
fn update_and_delete_unknown_id_return_not_found() {
    let mut repo = InMemoryRepository::<Task>::new();
    let err = repo.update(7, TaskDraft::new("x")).unwrap_err();
    assert_eq!(err, RepoError::NotFound { kind: "task", id: 7 });
    let err = repo.delete(7).unwrap_err();
    assert_eq!(err, RepoError::NotFound { kind: "task", id: 7 });
    assert_eq!(repo.version(), 0);
}

#[test]
fn task_service_save_creates_then_updates() {
    let mut service = TaskService::new(InMemoryRepository::<Task>::with_clock(fixed_clock));

    let created = service
        .save_task(Some(99), TaskDraft::new("draft").with_priority(Priority::High))
        .unwrap();
    assert_eq!(created.id, 1);

    let mut draft = created.to_draft();
    draft.title = "final".to_string();
    let updated = service.save_task(Some(created.id), draft).unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.title, "final");
    assert_eq!(service.into_inner().len(), 1);
}

#[test]
fn task_service_rejects_blank_title() {
    let mut service = TaskService::new(InMemoryRepository::<Task>::new());
    let err = service.create_task(TaskDraft::new("   ")).unwrap_err();
    assert_eq!(err, ServiceError::Validation(ValidationError::EmptyTitle));
}

#[test]
fn toggle_flips_completion_and_list_reflects_it() {
    let mut service = TaskService::new(InMemoryRepository::<Task>::with_clock(fixed_clock));
    let task = service.create_task(TaskDraft::new("ship")).unwrap();

    let toggled = service.toggle_task(task.id).unwrap();
    assert!(toggled.completed);

    let filter = TaskFilter {
        status: Some(EffectiveStatus::Completed),
        ..TaskFilter::default()
    };
    let done = service.list_tasks(&filter, &fixed_clock()).unwrap();
    assert_eq!(done.len(), 1);

    let reopened = service.toggle_task(task.id).unwrap();
    assert!(!reopened.completed);
    assert_eq!(
        service.toggle_task(404).unwrap_err(),
        ServiceError::NotFound { kind: "task", id: 404 }
    );
}

#[test]
fn note_service_normalizes_tags_and_lists_index() {
    let mut repo = InMemoryRepository::<Note>::with_clock(fixed_clock);
    {
        let mut service = NoteService::new(&mut repo);
        let mut draft = NoteDraft::new("Plan", "Quarter goals");
        draft.tags = vec!["Work".to_string(), " work ".to_string()];
        let note = service.create_note(draft).unwrap();
        assert_eq!(note.tags, vec!["work"]);

        let tagged = service.add_tag(note.id, " Q3 ").unwrap();
        assert_eq!(tagged.tags, vec!["work", "q3"]);
        let unchanged = service.add_tag(note.id, "q3").unwrap();
        assert_eq!(unchanged, tagged);

        let err = service.add_tag(note.id, "  ").unwrap_err();
        assert_eq!(err, ServiceError::Validation(ValidationError::BlankTag));

        assert_eq!(service.list_tags().unwrap(), vec!["q3", "work"]);
        let untagged = service.remove_tag(note.id, "work").unwrap();
        assert_eq!(untagged.tags, vec!["q3"]);
    }
    assert_eq!(repo.version(), 3);
}

#[test]
fn note_service_list_applies_filter() {
    let mut service = NoteService::new(InMemoryRepository::<Note>::with_clock(fixed_clock));
    service.create_note(NoteDraft::new("Groceries", "milk")).unwrap();
    service.create_note(NoteDraft::new("Roadmap", "planning notes")).unwrap();

    let filter = NoteFilter {
        search_text: Some("plan".to_string()),
        ..NoteFilter::default()
    };
    let listed = service.list_notes(&filter).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Roadmap");
}

#[test]
fn meeting_service_manages_participants_and_status() {
    let mut service = MeetingService::new(InMemoryRepository::<Meeting>::with_clock(fixed_clock));
    let when = fixed_clock() + Duration::days(1);
    let meeting = service
        .create_meeting(MeetingDraft::new("Kickoff", when).with_agenda("scope"))
        .unwrap();
    assert_eq!(meeting.duration, 60);
    assert_eq!(meeting.status, MeetingStatus::Upcoming);

    let with_ana = service.add_participant(meeting.id, " ana ").unwrap();
    assert_eq!(with_ana.participants, vec!["ana"]);
    assert_eq!(
        service.add_participant(meeting.id, "").unwrap_err(),
        ServiceError::Validation(ValidationError::BlankParticipant)
    );

    let started = service.set_status(meeting.id, MeetingStatus::InProgress).unwrap();
    assert_eq!(started.status, MeetingStatus::InProgress);

    let filter = MeetingFilter {
        search_text: Some("ANA".to_string()),
        ..MeetingFilter::default()
    };
    assert_eq!(service.list_meetings(&filter, &fixed_clock()).unwrap().len(), 1);

    service.delete_meeting(meeting.id).unwrap();
    assert_eq!(service.get_meeting(meeting.id).unwrap(), None);
}

#[test]
fn dashboard_service_reads_all_repositories() {
    let mut tasks = InMemoryRepository::<Task>::with_clock(fixed_clock);
    let mut notes = InMemoryRepository::<Note>::with_clock(fixed_clock);
    let mut meetings = InMemoryRepository::<Meeting>::with_clock(fixed_clock);
    tasks
        .create(TaskDraft::new("today").with_due_date(fixed_clock() + Duration::hours(2)))
        .unwrap();
    notes.create(NoteDraft::new("n", "c")).unwrap();
    meetings
        .create(MeetingDraft::new("m", fixed_clock() + Duration::hours(1)))
        .unwrap();

    let view = DashboardService::new(&tasks, &notes, &meetings)
        .overview(&fixed_clock())
        .unwrap();
    assert_eq!(view.todays_tasks.len(), 1);
    assert_eq!(view.recent_notes.len(), 1);
    assert_eq!(view.todays_meetings.len(), 1);
    assert_eq!(view.tasks_due_today_total, 1);
    assert_eq!(view.upcoming_meeting_count, 1);
}
