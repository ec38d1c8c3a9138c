//! Habit commands: add, edit, delete, complete, list

use anyhow::{bail, Result};

use levelup::{Category, Day, Difficulty, HabitUpdate, JsonFileStorage, Tracker};

use super::{confirm, short_id};

type FileTracker = Tracker<JsonFileStorage>;

pub async fn add_command(
    tracker: &mut FileTracker,
    name: &str,
    category: Category,
    difficulty: Difficulty,
) -> Result<()> {
    let habit = tracker.create_habit(name, category, difficulty)?;
    println!("New habit \"{}\" created! 🎯", habit.name);
    println!(
        "  {} {}  ⭐ {} XP  (id {})",
        habit.category.icon(),
        habit.category.label(),
        habit.xp,
        short_id(habit.id.as_str())
    );
    Ok(())
}

pub async fn edit_command(
    tracker: &mut FileTracker,
    id: &str,
    name: Option<String>,
    category: Option<Category>,
    difficulty: Option<Difficulty>,
) -> Result<()> {
    let update = HabitUpdate {
        name,
        category,
        difficulty,
    };
    if update.is_empty() {
        bail!("Nothing to change: pass --name, --category or --difficulty");
    }

    let id = tracker.resolve_id(id)?;
    let habit = tracker.update_habit(&id, update)?;
    println!("Habit \"{}\" updated! ✏️", habit.name);
    Ok(())
}

pub async fn delete_command(tracker: &mut FileTracker, id: &str, yes: bool) -> Result<()> {
    let id = tracker.resolve_id(id)?;
    let name = tracker
        .store()
        .habit(&id)
        .map(|h| h.name.clone())
        .unwrap_or_default();

    if !yes && !confirm(&format!("Delete habit \"{name}\"?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    tracker.delete_habit(&id)?;
    println!("Habit deleted! 🗑️");
    Ok(())
}

pub async fn complete_command(tracker: &mut FileTracker, id: &str, date: Option<&str>) -> Result<()> {
    let day = match date {
        Some(date) => date.parse::<Day>()?,
        None => Day::today(),
    };
    let id = tracker.resolve_id(id)?;
    let result = tracker.complete_habit(&id, day)?;

    if result.already_completed {
        println!("Already completed on {day}! 🎉");
        return Ok(());
    }

    println!("Quest completed! +{} XP 🎉", result.xp_awarded);
    println!("  🔥 {} day streak", result.new_streak);
    if let Some(level) = result.new_level {
        println!();
        println!("  ✨ LEVEL UP! You reached level {level} ✨");
    }
    Ok(())
}

pub async fn list_command(tracker: &FileTracker) -> Result<()> {
    let store = tracker.store();
    let today = Day::today();
    let player = store.player();

    println!(
        "Level {}  {}  {}/{} XP",
        player.level,
        super::xp_bar(player, 20),
        player.xp,
        player.xp_needed()
    );
    println!();

    if store.habits().is_empty() {
        println!("No habits yet. Start your quest with `levelup add <name>`.");
        return Ok(());
    }

    for habit in store.habits() {
        let done = if habit.is_completed_on(today) {
            "✅ Done"
        } else {
            "🎯 Open"
        };
        println!(
            "  {}  {} {}",
            short_id(habit.id.as_str()),
            habit.category.icon(),
            habit.name
        );
        println!(
            "            {}  🔥 {} day streak  ⭐ {} XP  {}",
            habit.category.label(),
            habit.streak,
            habit.xp,
            done
        );
    }

    let summary = store.summary(today);
    println!();
    println!(
        "Total streak: {}  Completed today: {}/{}",
        summary.total_streak, summary.completed_today, summary.total_habits
    );
    Ok(())
}
