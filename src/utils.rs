//! Some utility functions

use crate::marks::CalendarMarks;
use crate::task::Task;

/// A debug utility that pretty-prints a task list
pub fn print_task_list(tasks: &[Task]) {
    for task in tasks {
        print_task(task);
    }
}

pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    println!("    {} {}\t({}, {})", completion, task.text(), task.date(), task.id());
}

/// A debug utility that pretty-prints the marked days of a calendar
pub fn print_marked_dates(marks: &CalendarMarks) {
    let mut dates: Vec<_> = marks.dates().collect();
    dates.sort();
    for date in dates {
        println!("    • {}", date);
    }
}
