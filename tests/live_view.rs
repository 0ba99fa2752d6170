mod scenarii;

use chrono::{Duration, Utc};

use corkboard::memory::MemoryStore;
use corkboard::{TaskFeed, TaskFields, TaskStore};
use scenarii::{date, populate_store, user, SeedTask};

#[tokio::test]
async fn test_feed_shows_the_tasks_of_the_selected_day() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[SeedTask::pending("Buy milk", "2025-07-16", "u1")]).await;
    let u = user("u1");
    let feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    assert_eq!(feed.visible_tasks().len(), 1);
    assert_eq!(feed.visible_tasks()[0].text(), "Buy milk");
    assert!(feed.visible_tasks()[0].completed() == false);
    assert!(feed.marked_dates().is_marked(date("2025-07-16")));
}

#[tokio::test]
async fn test_changing_day_refilters_without_a_new_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[SeedTask::pending("Buy milk", "2025-07-16", "u1")]).await;
    let u = user("u1");
    let mut feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    // No mutation happens between here and the assertions: the refilter must come from the
    // last received snapshot, on the spot
    feed.set_selected_date(date("2025-07-17"));

    assert!(feed.visible_tasks().is_empty());
    assert!(feed.marked_dates().is_marked(date("2025-07-16")));

    feed.set_selected_date(date("2025-07-16"));
    assert_eq!(feed.visible_tasks().len(), 1);
}

#[tokio::test]
async fn test_no_user_means_no_subscription_and_empty_views() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[SeedTask::pending("Buy milk", "2025-07-16", "u1")]).await;
    let mut feed = TaskFeed::new(&store, None, date("2025-07-16"));

    assert_eq!(store.active_watchers(), 0);
    assert!(feed.visible_tasks().is_empty());
    assert!(feed.marked_dates().is_empty());
    assert!(feed.last_error().is_none());

    assert!(feed.refresh() == false);
    assert!(feed.changed().await == false);
}

#[tokio::test]
async fn test_dropping_the_feed_releases_the_watcher() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[]).await;
    let u = user("u1");

    let feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));
    assert_eq!(store.active_watchers(), 1);

    let second = TaskFeed::new(&store, Some(&u), date("2025-07-16"));
    assert_eq!(store.active_watchers(), 2);

    drop(feed);
    assert_eq!(store.active_watchers(), 1);
    drop(second);
    assert_eq!(store.active_watchers(), 0);
}

#[tokio::test]
async fn test_completing_the_last_pending_task_clears_the_day_mark() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[
        SeedTask::done("Water the plants", "2025-07-16", "u1"),
        SeedTask::pending("Buy milk", "2025-07-16", "u1"),
    ]).await;
    let u = user("u1");
    let mut feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    // One task is done already, the day stays marked for the pending one
    assert!(feed.marked_dates().is_marked(date("2025-07-16")));

    let pending = feed
        .visible_tasks()
        .iter()
        .find(|task| task.completed() == false)
        .unwrap()
        .clone();
    store.set_completed(pending.id(), true).await.unwrap();

    assert!(feed.refresh());
    assert!(feed.marked_dates().is_marked(date("2025-07-16")) == false);
    // Both tasks are still listed, now completed
    assert_eq!(feed.visible_tasks().len(), 2);
    assert!(feed.visible_tasks().iter().all(|task| task.completed()));
}

#[tokio::test]
async fn test_a_lost_subscription_keeps_the_stale_views() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[SeedTask::pending("Buy milk", "2025-07-16", "u1")]).await;
    let u = user("u1");
    let mut feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    store.break_subscriptions("permission revoked");
    assert!(feed.refresh());

    assert_eq!(feed.last_error(), Some("permission revoked"));
    assert_eq!(feed.visible_tasks().len(), 1);
    assert!(feed.marked_dates().is_marked(date("2025-07-16")));

    // The next snapshot clears the error state
    store
        .create_task(TaskFields::new(
            "Call the bank".to_string(),
            u.clone(),
            date("2025-07-16"),
        ))
        .await
        .unwrap();
    assert!(feed.refresh());
    assert!(feed.last_error().is_none());
    assert_eq!(feed.visible_tasks().len(), 2);
}

#[tokio::test]
async fn test_other_users_tasks_stay_invisible() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[
        SeedTask::pending("Buy milk", "2025-07-16", "u1"),
        SeedTask::pending("Plot world domination", "2025-07-16", "u2"),
        SeedTask::pending("Feed the cat", "2025-07-17", "u2"),
    ]).await;
    let u = user("u1");
    let feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    assert_eq!(feed.visible_tasks().len(), 1);
    assert_eq!(feed.visible_tasks()[0].text(), "Buy milk");
    // u2's pending task on the 17th must not leak into u1's calendar either
    assert!(feed.marked_dates().is_marked(date("2025-07-17")) == false);
}

#[tokio::test]
async fn test_every_recompute_is_published_on_the_updates_channel() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[SeedTask::pending("Buy milk", "2025-07-16", "u1")]).await;
    let u = user("u1");
    let mut feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    let mut updates = feed.updates();

    store
        .create_task(TaskFields::new(
            "Call the bank".to_string(),
            u.clone(),
            date("2025-07-16"),
        ))
        .await
        .unwrap();
    feed.refresh();

    assert!(updates.has_changed().unwrap());
    let state = updates.borrow_and_update().clone();
    assert_eq!(state.tasks.len(), 2);
    assert!(state.error.is_none());

    feed.set_selected_date(date("2025-07-17"));
    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().tasks.is_empty());
}

#[tokio::test]
async fn test_snapshots_are_ordered_by_creation_time() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = MemoryStore::new();
    let u = user("u1");
    let day = date("2025-07-16");
    let base = Utc::now();

    // Created out of chronological order on purpose
    for (text, offset) in &[("third", 2), ("first", 0), ("second", 1)] {
        let mut fields = TaskFields::new(text.to_string(), u.clone(), day);
        fields.created_at = base + Duration::seconds(*offset);
        store.create_task(fields).await.unwrap();
    }

    let feed = TaskFeed::new(&store, Some(&u), day);
    let texts: Vec<&str> = feed.visible_tasks().iter().map(|task| task.text()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_waiting_for_the_next_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = populate_store(&[SeedTask::pending("Buy milk", "2025-07-16", "u1")]).await;
    let u = user("u1");
    let mut feed = TaskFeed::new(&store, Some(&u), date("2025-07-16"));

    let writer = store.clone();
    let writer_user = u.clone();
    let handle = tokio::spawn(async move {
        writer
            .create_task(TaskFields::new(
                "Call the bank".to_string(),
                writer_user,
                date("2025-07-16"),
            ))
            .await
            .unwrap();
    });

    assert!(feed.changed().await);
    assert_eq!(feed.visible_tasks().len(), 2);
    handle.await.unwrap();
}
