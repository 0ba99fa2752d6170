//! Calendar annotations derived from a task snapshot

use std::collections::HashMap;

use chrono::NaiveDate;
use csscolorparser::Color;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// The marker put on a single calendar day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayMark {
    pub marked: bool,
    pub dot_color: Color,
}

/// Which calendar days carry a dot because they still have unfinished tasks.
///
/// This is derived state: it is rebuilt from scratch out of every snapshot, and is never
/// persisted nor patched incrementally. A day is present iff at least one of its tasks is
/// not completed, so a day mixing done and pending tasks stays marked, and a day whose last
/// pending task gets completed silently vanishes from the next rebuild
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarMarks {
    marks: HashMap<NaiveDate, DayMark>,
}

impl CalendarMarks {
    /// Rebuild the marks from a full task snapshot
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let dot_color = crate::config::DOT_COLOR.lock().unwrap().clone();

        let mut marks = HashMap::new();
        for task in tasks {
            if task.completed() == false {
                marks.insert(
                    task.date(),
                    DayMark {
                        marked: true,
                        dot_color: dot_color.clone(),
                    },
                );
            }
        }
        Self { marks }
    }

    pub fn is_marked(&self, date: NaiveDate) -> bool {
        self.marks.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayMark> {
        self.marks.get(&date)
    }

    /// The marked days, in no particular order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.marks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
