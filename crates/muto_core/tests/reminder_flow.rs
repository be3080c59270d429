use muto_core::notify::coordinator::{reminder_id, ACTION_COMPLETE_TASK};
use muto_core::{
    parse_reminder_action, DispatchOutcome, InMemoryTaskRepository, NewTask,
    NotificationCategory, NotificationCenter, NotificationCommand, NotificationError,
    NotificationRequest, NotificationResult, NotificationTrigger, OutboxNotificationCenter,
    ReminderAction, ReminderCoordinator, ReminderSettings, TaskColor, TaskStore,
};
use std::sync::{Arc, Mutex};

const FIRE_AT_MS: i64 = 1_792_303_600_000;

fn coordinator_for(center: Arc<OutboxNotificationCenter>) -> Arc<ReminderCoordinator> {
    Arc::new(ReminderCoordinator::new(center, ReminderSettings::default()))
}

#[test]
fn granted_permission_registers_reminder_actions() {
    let center = Arc::new(OutboxNotificationCenter::granted());
    let coordinator = coordinator_for(center.clone());

    assert!(coordinator.request_permission());
    assert!(coordinator.permission_granted());

    let categories = center.categories();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "TASK_REMINDER");
    let action_ids: Vec<&str> = categories[0]
        .actions
        .iter()
        .map(|action| action.id.as_str())
        .collect();
    assert_eq!(action_ids, vec![ACTION_COMPLETE_TASK]);
    assert_eq!(categories[0].actions[0].title, "Mark as Complete");
}

#[test]
fn denied_permission_degrades_to_silent_reminders() {
    let center = Arc::new(OutboxNotificationCenter::denied());
    let coordinator = coordinator_for(center.clone());
    assert!(!coordinator.request_permission());
    let mut store = TaskStore::in_memory(coordinator.clone());

    let id = store
        .add_task(NewTask::new("Quiet", "", TaskColor::Blue).with_reminder_at(FIRE_AT_MS))
        .expect("task is still created");
    assert_eq!(store.len(), 1);
    assert!(center.pending().is_empty());

    assert_eq!(store.toggle_completion(id), Some(true));
    assert!(center.delivered().is_empty());
    assert_eq!(
        center.drain(),
        vec![NotificationCommand::Cancel(reminder_id(id))]
    );
    assert_eq!(
        coordinator.notify_completed(id, "Quiet"),
        DispatchOutcome::Skipped
    );
}

#[test]
fn permission_is_required_before_first_schedule() {
    let center = Arc::new(OutboxNotificationCenter::granted());
    let coordinator = coordinator_for(center.clone());
    let mut store = TaskStore::in_memory(coordinator);

    store
        .add_task(NewTask::new("Early", "", TaskColor::Red).with_reminder_at(FIRE_AT_MS))
        .expect("task is created");
    assert!(center.pending().is_empty());
}

/// Grants permission, then fails every request while recording call order.
#[derive(Default)]
struct FlakyCenter {
    calls: Mutex<Vec<String>>,
}

impl NotificationCenter for FlakyCenter {
    fn request_permission(&self) -> NotificationResult<bool> {
        Ok(true)
    }

    fn register_categories(&self, _: &[NotificationCategory]) -> NotificationResult<()> {
        Ok(())
    }

    fn schedule(&self, request: &NotificationRequest) -> NotificationResult<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("schedule:{}", request.id));
        Err(NotificationError::Rejected("too many requests".to_string()))
    }

    fn cancel(&self, id: &str) -> NotificationResult<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("cancel:{id}"));
        Err(NotificationError::Unavailable("daemon gone".to_string()))
    }

    fn send_immediate(&self, request: &NotificationRequest) -> NotificationResult<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("immediate:{}", request.id));
        Err(NotificationError::Unavailable("daemon gone".to_string()))
    }
}

#[test]
fn notification_failures_never_block_task_mutations() {
    let center = Arc::new(FlakyCenter::default());
    let coordinator = Arc::new(ReminderCoordinator::new(
        center.clone(),
        ReminderSettings::default(),
    ));
    assert!(coordinator.request_permission());
    let mut store = TaskStore::in_memory(coordinator);

    let id = store
        .add_task(NewTask::new("Flaky", "", TaskColor::Orange).with_reminder_at(FIRE_AT_MS))
        .expect("task is created despite scheduling failure");
    assert_eq!(store.toggle_completion(id), Some(true));
    assert!(store.delete_task(id).is_some());
    assert!(store.is_empty());

    let calls = center.calls.lock().expect("calls lock").clone();
    assert_eq!(
        calls,
        vec![
            format!("schedule:{id}"),
            format!("cancel:{id}"),
            format!("immediate:{id}-completion"),
            format!("cancel:{id}"),
        ]
    );
}

fn granted_store() -> (TaskStore<InMemoryTaskRepository>, Arc<OutboxNotificationCenter>) {
    let center = Arc::new(OutboxNotificationCenter::granted());
    let coordinator = coordinator_for(center.clone());
    coordinator.request_permission();
    center.drain();
    (TaskStore::in_memory(coordinator), center)
}

#[test]
fn snooze_action_is_rejected_and_reminder_left_alone() {
    let (mut store, center) = granted_store();
    let id = store
        .add_task(NewTask::new("Call mom", "", TaskColor::Green).with_reminder_at(FIRE_AT_MS))
        .expect("valid task");
    center.drain();

    assert!(parse_reminder_action("REMIND_LATER").is_err());

    let task = store.get(id).expect("task");
    assert!(!task.is_completed);
    assert_eq!(task.reminder_at, Some(FIRE_AT_MS));
    assert!(center.drain().is_empty());
    assert_eq!(center.pending().len(), 1);
}

#[test]
fn complete_action_matches_toggle_side_effects() {
    let (mut store, center) = granted_store();
    let id = store
        .add_task(NewTask::new("Water plants", "", TaskColor::Blue).with_reminder_at(FIRE_AT_MS))
        .expect("valid task");

    let action = parse_reminder_action("COMPLETE_TASK").expect("known action");
    assert!(store.handle_reminder_action(id, action));

    assert!(store.get(id).expect("task").is_completed);
    assert!(center.pending().is_empty());
    assert_eq!(center.delivered().len(), 1);

    assert!(!store.handle_reminder_action(id, ReminderAction::Complete));
    assert_eq!(center.delivered().len(), 1);
    assert!(center.pending().is_empty());
}

#[test]
fn complete_action_without_reminder_schedules_nothing() {
    let (mut store, center) = granted_store();
    let id = store
        .add_task(NewTask::new("Read", "", TaskColor::Orange))
        .expect("valid task");

    assert!(store.handle_reminder_action(id, ReminderAction::Complete));

    assert!(center.pending().is_empty());
    let commands = center.drain();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0], NotificationCommand::Cancel(reminder_id(id)));
    assert!(matches!(commands[1], NotificationCommand::SendImmediate(_)));
}

#[test]
fn custom_settings_flow_into_alerts() {
    let center = Arc::new(OutboxNotificationCenter::granted());
    let raw = r#"{"completion_delay_secs": 5, "category_id": "CUSTOM"}"#;
    let settings = ReminderSettings::from_json(raw).expect("valid settings");
    let coordinator = Arc::new(ReminderCoordinator::new(center.clone(), settings));
    coordinator.request_permission();
    assert_eq!(center.categories()[0].id, "CUSTOM");
    let mut store = TaskStore::in_memory(coordinator);

    let id = store
        .add_task(NewTask::new("Tea", "", TaskColor::Red).with_reminder_at(FIRE_AT_MS))
        .expect("valid task");
    let scheduled = center
        .pending_request(&reminder_id(id))
        .expect("scheduled reminder");
    assert_eq!(scheduled.content.category.as_deref(), Some("CUSTOM"));

    store.handle_reminder_action(id, ReminderAction::Complete);
    let delivered = center.delivered();
    assert_eq!(
        delivered[0].trigger,
        NotificationTrigger::AfterDelay { seconds: 5 }
    );
}

#[test]
fn unknown_task_action_is_ignored() {
    let (mut store, center) = granted_store();
    let unknown = uuid::Uuid::new_v4();
    assert!(!store.handle_reminder_action(unknown, ReminderAction::Complete));
    assert!(center.drain().is_empty());
}
