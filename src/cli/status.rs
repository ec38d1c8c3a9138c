//! Status command implementation

use anyhow::Result;

use levelup::{Day, JsonFileStorage, Tracker};

/// Show the player's level meter and lifetime numbers
pub async fn status_command(tracker: &Tracker<JsonFileStorage>) -> Result<()> {
    let store = tracker.store();
    let player = store.player();
    let summary = store.summary(Day::today());
    let best = store.habits().iter().map(|h| h.best_streak).max().unwrap_or(0);

    println!("Level {}", player.level);
    println!(
        "  {} {}/{} XP ({:.0}%)",
        super::xp_bar(player, 30),
        player.xp,
        player.xp_needed(),
        player.progress() * 100.0
    );
    println!("  Total XP:        {}", player.total_xp);
    println!("  Habits:          {}", summary.total_habits);
    println!("  Completed today: {}", summary.completed_today);
    println!("  Total streak:    {}", summary.total_streak);
    println!("  Best streak:     {}", best);
    Ok(())
}
