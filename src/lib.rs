//! This crate provides a way to manage per-date to-do lists that live in a remote document store.
//!
//! It provides a store client in the [`client`] module, that can be used as a stand-alone module.
//!
//! Because the store pushes every change (made from any of the user's devices) back as a full snapshot, this crate also provides a live view over those snapshots in the [`feed`] module. \
//! A [`TaskFeed`] subscribes to all the tasks of one user, keeps the subset for the currently selected day plus the calendar dots derived from the whole set, and republishes both after every change. \
//! Mutations go through a [`TaskActions`] gateway, which also owns the optimistic input state of the "add a task" prompt.

pub mod config;
pub mod error;
pub use error::StoreError;
mod task;
pub use task::{Task, TaskFields, TaskId, UserId};
mod marks;
pub use marks::{CalendarMarks, DayMark};
pub mod traits;
pub use traits::TaskStore;
pub mod subscription;
pub use subscription::{SnapshotEvent, TaskWatch};
pub mod feed;
pub use feed::{FeedState, TaskFeed};
pub mod actions;
pub use actions::{TaskActions, TaskComposer};

pub mod client;
pub mod memory;
pub use memory::MemoryStore;
pub mod mock_behaviour;
pub mod cache;
pub mod identity;
pub mod utils;
