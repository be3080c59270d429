//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `muto_core` linkage without the mobile host.
//! - Run one add/complete scenario against the outbox notification center and
//!   print the commands the host would receive.

use muto_core::{
    NewTask, NotificationCommand, OutboxNotificationCenter, ReminderCoordinator,
    ReminderSettings, TaskColor, TaskStore,
};
use std::sync::Arc;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn main() {
    println!("muto_core ping={}", muto_core::ping());
    println!("muto_core version={}", muto_core::core_version());

    let center = Arc::new(OutboxNotificationCenter::granted());
    let coordinator = Arc::new(ReminderCoordinator::new(
        center.clone(),
        ReminderSettings::default(),
    ));
    coordinator.request_permission();
    let mut store = TaskStore::in_memory(coordinator);

    let now_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default();
    let request = NewTask::new("Buy milk", "", TaskColor::Blue).with_reminder_at(now_ms + DAY_MS);
    let Ok(id) = store.add_task(request) else {
        eprintln!("scenario task was rejected");
        std::process::exit(1);
    };
    println!(
        "after add: active={} completed={} pending_reminders={}",
        store.active_tasks().count(),
        store.completed_tasks().count(),
        center.pending().len()
    );

    store.toggle_completion(id);
    println!(
        "after complete: active={} completed={} pending_reminders={}",
        store.active_tasks().count(),
        store.completed_tasks().count(),
        center.pending().len()
    );

    for command in center.drain() {
        println!("outbox {}", describe(&command));
    }
}

fn describe(command: &NotificationCommand) -> String {
    match command {
        NotificationCommand::RegisterCategories(categories) => {
            format!("register_categories count={}", categories.len())
        }
        NotificationCommand::Schedule(request) => format!("schedule id={}", request.id),
        NotificationCommand::Cancel(id) => format!("cancel id={id}"),
        NotificationCommand::SendImmediate(request) => {
            format!("send_immediate id={}", request.id)
        }
    }
}
