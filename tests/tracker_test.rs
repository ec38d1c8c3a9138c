//! Integration tests for the write-through tracker

mod common;

use common::{file_tracker, oct, reopen};
use levelup::{
    Category, Confirmation, Difficulty, HabitError, HabitUpdate, LevelingPolicy, MemoryStorage,
    PlayerState, Storage, Tracker,
};

#[test]
fn test_state_survives_reopen() {
    let (dir, mut tracker) = file_tracker();
    let habit = tracker
        .create_habit("Practice guitar", Category::Creative, Difficulty::Hard)
        .expect("create");
    tracker.complete_habit(&habit.id, oct(14)).expect("complete");
    tracker.complete_habit(&habit.id, oct(15)).expect("complete");

    let reopened = reopen(&dir);
    let stored = reopened.store().habit(&habit.id).expect("habit persisted");
    assert_eq!(stored.streak, 2);
    assert_eq!(stored.completed_dates, vec![oct(14), oct(15)]);
    assert_eq!(reopened.store().player().xp, 60);
    assert_eq!(reopened.store().player().total_xp, 60);
}

#[test]
fn test_edit_and_delete_are_persisted() {
    let (dir, mut tracker) = file_tracker();
    let keep = tracker
        .create_habit("Read", Category::Learning, Difficulty::Easy)
        .unwrap();
    let gone = tracker
        .create_habit("Doomscroll less", Category::Mindfulness, Difficulty::Medium)
        .unwrap();

    tracker
        .update_habit(
            &keep.id,
            HabitUpdate {
                difficulty: Some(Difficulty::Medium),
                ..Default::default()
            },
        )
        .unwrap();
    tracker.delete_habit(&gone.id).unwrap();

    let reopened = reopen(&dir);
    assert_eq!(reopened.store().habits().len(), 1);
    assert_eq!(reopened.store().habits()[0].xp, 20);
    assert!(reopened.store().habit(&gone.id).is_none());
}

#[test]
fn test_level_up_through_completions() {
    let (_dir, mut tracker) = file_tracker();
    let ids: Vec<_> = (0..4)
        .map(|i| {
            tracker
                .create_habit(&format!("Quest {i}"), Category::Productivity, Difficulty::Hard)
                .unwrap()
                .id
        })
        .collect();

    let mut level_ups = Vec::new();
    for id in &ids {
        let result = tracker.complete_habit(id, oct(16)).unwrap();
        if result.leveled_up {
            level_ups.push(result.new_level);
        }
    }

    // 4 x 30 XP = 120: one level-up on the fourth completion, 20 XP left over
    assert_eq!(level_ups, vec![Some(2)]);
    assert_eq!(tracker.store().player().level, 2);
    assert_eq!(tracker.store().player().xp, 20);
    assert_eq!(tracker.store().summary(oct(16)).completed_today, 4);
}

#[test]
fn test_reset_requires_confirmation() {
    let (dir, mut tracker) = file_tracker();
    let habit = tracker
        .create_habit("Floss", Category::Health, Difficulty::Easy)
        .unwrap();
    tracker.complete_habit(&habit.id, oct(1)).unwrap();

    let err = tracker.reset(Confirmation::Declined).unwrap_err();
    assert!(matches!(err, HabitError::Unconfirmed));
    assert_eq!(reopen(&dir).store().habits().len(), 1);

    tracker.reset(Confirmation::Confirmed).unwrap();
    assert!(tracker.store().habits().is_empty());

    let reopened = reopen(&dir);
    assert!(reopened.store().habits().is_empty());
    assert_eq!(reopened.store().player(), &PlayerState::default());
}

#[test]
fn test_import_replaces_everything() {
    let (_dir, mut source) = file_tracker();
    let habit = source
        .create_habit("Stretch", Category::Health, Difficulty::Medium)
        .unwrap();
    source.complete_habit(&habit.id, oct(3)).unwrap();
    let backup = source.export(chrono::Utc::now()).to_json().unwrap();

    let (dir, mut target) = file_tracker();
    target
        .create_habit("Something else", Category::Social, Difficulty::Easy)
        .unwrap();
    target.import_json(&backup).unwrap();

    assert_eq!(target.store().habits(), source.store().habits());
    assert_eq!(target.store().player(), source.store().player());

    let reopened = reopen(&dir);
    assert_eq!(reopened.store().habits(), source.store().habits());
}

#[test]
fn test_bad_import_leaves_state_alone() {
    let (dir, mut tracker) = file_tracker();
    tracker
        .create_habit("Water plants", Category::Health, Difficulty::Easy)
        .unwrap();

    let err = tracker.import_json(r#"{"habits": []}"#).unwrap_err();
    assert!(matches!(err, HabitError::Format(_)));
    assert_eq!(tracker.store().habits().len(), 1);
    assert_eq!(reopen(&dir).store().habits().len(), 1);
}

#[test]
fn test_write_failure_is_reported_and_retryable() {
    let mut tracker = Tracker::open(MemoryStorage::new(), LevelingPolicy::SingleStep).unwrap();
    let habit = tracker
        .create_habit("Journal", Category::Mindfulness, Difficulty::Easy)
        .unwrap();

    tracker.storage_mut().set_fail_writes(true);
    let err = tracker.complete_habit(&habit.id, oct(2)).unwrap_err();
    assert!(matches!(err, HabitError::Persistence { .. }));
    // The mutation itself went through
    assert_eq!(tracker.store().player().xp, 10);

    tracker.storage_mut().set_fail_writes(false);
    tracker.save().unwrap();
    assert_eq!(tracker.storage().load_player().unwrap().xp, 10);
    assert_eq!(tracker.storage().load_habits().unwrap()[0].streak, 1);
}

/// Backup with one hard habit and a player holding `xp` at `level`
fn backup_with_player(name: &str, level: u32, xp: u32) -> String {
    serde_json::json!({
        "habits": [{
            "id": "1760600000000",
            "name": name,
            "category": "health",
            "difficulty": "hard",
            "xp": 30,
            "streak": 0,
            "bestStreak": 0,
            "completedDates": [],
            "lastCompleted": null
        }],
        "playerData": { "level": level, "xp": xp, "totalXp": xp },
        "exportDate": "2026-10-16T08:00:00Z"
    })
    .to_string()
}

#[test]
fn test_cascade_policy_from_open() {
    let backup = backup_with_player("Marathon", 1, 240);

    let mut cascade = Tracker::open(MemoryStorage::new(), LevelingPolicy::Cascade).unwrap();
    assert_eq!(cascade.store().policy(), LevelingPolicy::Cascade);
    cascade.import_json(&backup).unwrap();
    let id = cascade.resolve_id("1760600000000").unwrap();

    // 240 + 30 = 270: level 1 takes 100, level 2 takes 150, 20 left in level 3
    let result = cascade.complete_habit(&id, oct(1)).unwrap();
    assert!(result.leveled_up);
    assert_eq!(result.new_level, Some(3));
    assert_eq!(cascade.store().player().level, 3);
    assert_eq!(cascade.store().player().xp, 20);

    let mut single = Tracker::open(MemoryStorage::new(), LevelingPolicy::SingleStep).unwrap();
    single.import_json(&backup).unwrap();
    let result = single.complete_habit(&id, oct(1)).unwrap();
    assert_eq!(result.new_level, Some(2));
    assert_eq!(single.store().player().xp, 170);
}

#[test]
fn test_completion_at_max_level_does_not_overflow() {
    let mut tracker = Tracker::open(MemoryStorage::new(), LevelingPolicy::SingleStep).unwrap();
    tracker
        .import_json(&backup_with_player("Marathon", u32::MAX, u32::MAX))
        .unwrap();
    let id = tracker.resolve_id("1760600000000").unwrap();

    let result = tracker.complete_habit(&id, oct(1)).unwrap();
    assert!(!result.leveled_up);
    assert_eq!(tracker.store().player().level, u32::MAX);
}

#[test]
fn test_import_with_blank_name_is_rejected() {
    let (dir, mut tracker) = file_tracker();
    tracker
        .create_habit("Water plants", Category::Health, Difficulty::Easy)
        .unwrap();

    let err = tracker
        .import_json(&backup_with_player("   ", 2, 10))
        .unwrap_err();
    assert!(matches!(err, HabitError::Format(_)));
    assert_eq!(tracker.store().habits()[0].name, "Water plants");
    assert_eq!(tracker.store().player().level, 1);
    assert_eq!(reopen(&dir).store().habits()[0].name, "Water plants");
}

#[test]
fn test_resolve_id_prefix() {
    let (_dir, mut tracker) = file_tracker();
    let habit = tracker
        .create_habit("Cook dinner", Category::Social, Difficulty::Medium)
        .unwrap();

    let prefix = &habit.id.as_str()[..8];
    assert_eq!(tracker.resolve_id(prefix).unwrap(), habit.id);
    assert!(matches!(
        tracker.resolve_id("not-an-id"),
        Err(HabitError::NotFound(_))
    ));
}

#[test]
fn test_memory_storage_documents_are_versioned() {
    let mut tracker = Tracker::open(MemoryStorage::new(), LevelingPolicy::SingleStep).unwrap();
    let habit = tracker
        .create_habit("Sleep early", Category::Health, Difficulty::Easy)
        .unwrap();
    tracker.complete_habit(&habit.id, oct(9)).unwrap();

    let habits: serde_json::Value =
        serde_json::from_str(tracker.storage().habits_document().unwrap()).unwrap();
    assert_eq!(habits["version"], 1);
    assert_eq!(habits["habits"][0]["completedDates"][0], "2026-10-09");

    let player: serde_json::Value =
        serde_json::from_str(tracker.storage().player_document().unwrap()).unwrap();
    assert_eq!(player["totalXp"], 10);
}
