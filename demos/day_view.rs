use chrono::NaiveDate;

use corkboard::identity::{Identity, LocalIdentity};
use corkboard::memory::MemoryStore;
use corkboard::{TaskActions, TaskComposer, TaskFeed, UserId};

#[tokio::main]
async fn main() {
    env_logger::init();

    let store = MemoryStore::new();
    let identity = LocalIdentity::signed_in(UserId::from("alice"));
    let user = identity.current_user();

    let actions = TaskActions::new(store.clone());
    let mut composer = TaskComposer::new();

    let today = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
    let tomorrow = today.succ_opt().unwrap();

    for (text, date) in &[
        ("Buy milk", today),
        ("Water the plants", today),
        ("Call the bank", tomorrow),
    ] {
        composer.set_draft(text);
        actions
            .add_task(&mut composer, Some(*date), user.as_ref())
            .await
            .unwrap();
    }

    let mut feed = TaskFeed::new(&store, user.as_ref(), today);
    println!("---- {} ----", today);
    corkboard::utils::print_task_list(feed.visible_tasks());
    println!("marked days:");
    corkboard::utils::print_marked_dates(feed.marked_dates());

    // Complete everything planned today, then look at the calendar again
    for task in feed.visible_tasks().to_vec() {
        actions.toggle_task(task.id(), task.completed()).await;
    }
    feed.refresh();
    println!("---- {} (everything completed) ----", today);
    corkboard::utils::print_task_list(feed.visible_tasks());
    println!("marked days:");
    corkboard::utils::print_marked_dates(feed.marked_dates());

    feed.set_selected_date(tomorrow);
    println!("---- {} ----", tomorrow);
    corkboard::utils::print_task_list(feed.visible_tasks());
}
