//! Follows the tasks of one user on a hosted store, printing the view after every push.
//!
//! Set `STORE_URL` (and optionally `STORE_TOKEN`) plus `STORE_USER` to run it against your
//! own endpoint.

use corkboard::client::RestStore;
use corkboard::{TaskFeed, UserId};

#[tokio::main]
async fn main() {
    env_logger::init();

    let url = std::env::var("STORE_URL").expect("Please set STORE_URL");
    let token = std::env::var("STORE_TOKEN").ok();
    let user = UserId::from(std::env::var("STORE_USER").expect("Please set STORE_USER"));

    let store = RestStore::new(&url, token).unwrap();
    let today = chrono::Utc::now().date_naive();
    let mut feed = TaskFeed::new(&store, Some(&user), today);

    while feed.changed().await {
        match feed.last_error() {
            Some(err) => log::warn!("Subscription trouble: {} (showing stale data)", err),
            None => {
                println!("---- {} ----", today);
                corkboard::utils::print_task_list(feed.visible_tasks());
                println!("marked days:");
                corkboard::utils::print_marked_dates(feed.marked_dates());
            }
        }
    }
}
