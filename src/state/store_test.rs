use super::*;
use std::time::Duration;

use time::OffsetDateTime;

use crate::scheduler::{Task, TokioScheduler};
use crate::types::Role;

/// Scheduler that queues tasks until the test releases them.
#[derive(Default)]
struct ManualScheduler {
    pending: Mutex<Vec<(Duration, TaskHandle, Task)>>,
}

impl ManualScheduler {
    fn delays(&self) -> Vec<Duration> {
        self.pending.lock().unwrap().iter().map(|(d, _, _)| *d).collect()
    }

    fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.pending.lock().unwrap());
        for (_, handle, task) in tasks {
            handle.fire(task);
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        self.pending.lock().unwrap().push((delay, handle.clone(), task));
        handle
    }
}

fn manual_store() -> (Arc<ManualScheduler>, AppStore) {
    let scheduler = Arc::new(ManualScheduler::default());
    let store = AppStore::new(scheduler.clone(), Timings::default());
    (scheduler, store)
}

fn doc(id: &str, name: &str) -> Document {
    Document {
        id: id.to_owned(),
        name: name.to_owned(),
        mime_type: "application/pdf".to_owned(),
        size: 1024,
        upload_date: OffsetDateTime::UNIX_EPOCH,
        last_modified: OffsetDateTime::UNIX_EPOCH,
        user_id: "user-1".to_owned(),
        content: None,
        summary: None,
    }
}

// =============================================================
// defaults
// =============================================================

#[test]
fn initial_state_matches_defaults() {
    let (_scheduler, store) = manual_store();
    let state = store.snapshot();
    assert!(state.user.is_none());
    assert!(state.documents.is_empty());
    assert!(state.documents.current.is_none());
    assert!(state.chat.is_empty());
    assert_eq!(state.models.available.len(), 2);
    assert_eq!(state.models.selected_name(), Some("GPT-4 Turbo"));
    assert_eq!(state.ui.theme, Theme::Dark);
    assert!(!state.ui.processing);
    assert!(state.ui.notice.is_none());
}

// =============================================================
// documents
// =============================================================

#[test]
fn add_document_sets_current_and_processing() {
    let (scheduler, store) = manual_store();
    store.add_document(doc("a", "a.pdf"));

    let state = store.snapshot();
    assert_eq!(state.documents.current.as_ref().map(|d| d.name.as_str()), Some("a.pdf"));
    assert!(state.ui.processing);
    assert_eq!(scheduler.delays(), vec![Duration::from_millis(1500)]);

    scheduler.run_all();
    assert!(!store.snapshot().ui.processing);
}

#[test]
fn document_count_tracks_adds_minus_removes() {
    let (_scheduler, store) = manual_store();
    let ids = ["a", "b", "c", "d"];
    for (n, id) in ids.iter().enumerate() {
        store.add_document(doc(id, &format!("{id}.pdf")));
        let state = store.snapshot();
        assert_eq!(state.documents.len(), n + 1);
        assert_eq!(state.documents.current_id(), Some(*id));
    }
    assert!(store.remove_document("b"));
    assert!(store.remove_document("d"));
    assert_eq!(store.snapshot().documents.len(), ids.len() - 2);
}

#[test]
fn remove_current_document_clears_current() {
    let (_scheduler, store) = manual_store();
    store.add_document(doc("a", "a.pdf"));
    store.add_document(doc("b", "b.pdf"));

    store.remove_document("a");
    assert_eq!(store.snapshot().documents.current_id(), Some("b"));

    store.remove_document("b");
    assert_eq!(store.snapshot().documents.current, None);
}

#[test]
fn overlapping_uploads_earliest_reset_clears_flag() {
    let (scheduler, store) = manual_store();
    store.add_document(doc("a", "a.pdf"));
    let first = scheduler.pending.lock().unwrap().remove(0);
    store.add_document(doc("b", "b.pdf"));

    first.1.fire(first.2);
    assert!(!store.snapshot().ui.processing);
}

#[test]
fn cancelled_processing_reset_leaves_flag_set() {
    let (scheduler, store) = manual_store();
    let handle = store.add_document(doc("a", "a.pdf"));
    handle.cancel();
    scheduler.run_all();
    assert!(store.snapshot().ui.processing);
}

// =============================================================
// chat / models / theme
// =============================================================

#[test]
fn chat_messages_keep_insertion_order_without_dedup() {
    let (_scheduler, store) = manual_store();
    let hello = ChatMessage::new(Role::User, "hello", None);
    store.add_chat_message(hello.clone());
    store.add_chat_message(hello.clone());
    store.add_chat_message(ChatMessage::new(Role::Assistant, "hi", None));

    let chat = store.snapshot().chat;
    assert_eq!(chat.len(), 3);
    assert_eq!(chat.messages[0], hello);
    assert_eq!(chat.messages[1], hello);
    assert_eq!(chat.last().map(|m| m.role), Some(Role::Assistant));

    store.clear_chat_messages();
    assert!(store.snapshot().chat.is_empty());
}

#[test]
fn selected_model_is_not_validated() {
    let (_scheduler, store) = manual_store();
    let mut custom = store.snapshot().models.available[1].clone();
    custom.id = "custom".to_owned();
    custom.name = "Homebrew".to_owned();

    store.set_selected_model(Some(custom));
    assert_eq!(store.snapshot().models.selected_name(), Some("Homebrew"));

    store.set_selected_model(None);
    assert_eq!(store.snapshot().models.selected, None);
}

#[test]
fn toggle_theme_twice_restores_original() {
    let (_scheduler, store) = manual_store();
    let original = store.snapshot().ui.theme;
    assert_eq!(store.toggle_theme(), Theme::Light);
    store.toggle_theme();
    assert_eq!(store.snapshot().ui.theme, original);
}

// =============================================================
// notices
// =============================================================

#[test]
fn newer_notice_cancels_previous_dismissal() {
    let (scheduler, store) = manual_store();
    let first = store.notify(NoticeKind::Success, "saved");
    let second = store.notify(NoticeKind::Error, "failed");
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert_eq!(scheduler.delays(), vec![Duration::from_millis(5000); 2]);

    scheduler.run_all();
    assert!(store.snapshot().ui.notice.is_none());
    assert!(!first.has_fired());
    assert!(second.has_fired());
}

#[test]
fn stale_dismissal_does_not_clear_newer_notice() {
    let (scheduler, store) = manual_store();
    store.notify(NoticeKind::Success, "one");
    let (_, _, stale) = scheduler.pending.lock().unwrap().remove(0);
    store.notify(NoticeKind::Success, "two");

    stale();
    let notice = store.snapshot().ui.notice.unwrap();
    assert_eq!(notice.message, "two");
}

#[test]
fn dismiss_notice_clears_and_cancels() {
    let (_scheduler, store) = manual_store();
    let handle = store.notify(NoticeKind::Error, "oops");
    store.dismiss_notice();
    assert!(handle.is_cancelled());
    assert!(store.snapshot().ui.notice.is_none());
}

#[test]
fn concurrent_notices_keep_dismissal_for_the_one_showing() {
    let (scheduler, store) = manual_store();
    std::thread::scope(|scope| {
        for worker in 0..8 {
            let store = store.clone();
            scope.spawn(move || {
                for n in 0..50 {
                    store.notify(NoticeKind::Success, format!("worker {worker} notice {n}"));
                }
            });
        }
    });

    let live = scheduler
        .pending
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, handle, _)| !handle.is_cancelled())
        .count();
    assert_eq!(live, 1);

    scheduler.run_all();
    assert!(store.snapshot().ui.notice.is_none());
}

// =============================================================
// observation
// =============================================================

#[test]
fn subscribers_see_each_mutation() {
    let (_scheduler, store) = manual_store();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.add_document(doc("a", "a.pdf"));
    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.documents.current_id(), Some("a"));
    assert!(seen.ui.processing);
}

#[test]
fn clones_share_state() {
    let (_scheduler, store) = manual_store();
    let other = store.clone();
    other.set_user(None);
    other.add_chat_message(ChatMessage::new(Role::User, "x", None));
    assert_eq!(store.read(|s| s.chat.len()), 1);
}

#[tokio::test(start_paused = true)]
async fn processing_clears_after_delay_on_tokio() {
    let scheduler = Arc::new(TokioScheduler::try_current().unwrap());
    let store = AppStore::new(scheduler, Timings::default());

    store.add_document(doc("a", "a.pdf"));
    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(store.snapshot().ui.processing);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(!store.snapshot().ui.processing);
}
