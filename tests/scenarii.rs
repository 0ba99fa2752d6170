//! Helpers shared by the integration tests: seeded stores and their expected contents
#![allow(dead_code)]

use chrono::NaiveDate;

use corkboard::memory::MemoryStore;
use corkboard::{TaskFields, TaskStore, UserId};

pub fn user(name: &str) -> UserId {
    UserId::from(name)
}

pub fn date(day: &str) -> NaiveDate {
    day.parse().unwrap()
}

/// One task to seed a store with
pub struct SeedTask {
    pub text: &'static str,
    pub date: &'static str,
    pub completed: bool,
    pub user: &'static str,
}

impl SeedTask {
    pub fn pending(text: &'static str, date: &'static str, user: &'static str) -> Self {
        Self {
            text,
            date,
            completed: false,
            user,
        }
    }

    pub fn done(text: &'static str, date: &'static str, user: &'static str) -> Self {
        Self {
            text,
            date,
            completed: true,
            user,
        }
    }
}

/// A store holding the given tasks, created in order (so that snapshots list them in order)
pub async fn populate_store(seeds: &[SeedTask]) -> MemoryStore {
    let store = MemoryStore::new();
    for seed in seeds {
        let fields = TaskFields::new(seed.text.to_string(), user(seed.user), date(seed.date));
        let id = store.create_task(fields).await.unwrap();
        if seed.completed {
            store.set_completed(&id, true).await.unwrap();
        }
    }
    store
}
