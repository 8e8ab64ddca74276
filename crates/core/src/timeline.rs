use chrono::{Days, NaiveDate};

use crate::domain::task::Task;

/// Give every task a start and due date within the planning horizon.
///
/// Fully dated tasks are passed through. The rest are laid out one after
/// another in list order (not dependency order), starting at
/// `fallback_start`, each taking its own `duration_days` or an even share of
/// the horizon. Only backfilled tasks advance the cursor.
pub fn backfill_dates(tasks: &[Task], fallback_start: NaiveDate, horizon_days: u32) -> Vec<Task> {
    let horizon = horizon_days.max(1);
    let unscheduled = tasks.iter().filter(|t| !t.is_scheduled()).count();
    if unscheduled == 0 {
        return tasks.to_vec();
    }

    let slot = (horizon / unscheduled.max(1) as u32).max(1);
    let mut cursor = fallback_start;

    tasks
        .iter()
        .map(|task| {
            if task.is_scheduled() {
                return task.clone();
            }

            let start = task.start_date.unwrap_or(cursor);
            let duration = task.duration_days.unwrap_or(slot);
            let mut due = task
                .due_date
                .unwrap_or_else(|| add_days(start, u64::from(duration)));
            if due < start {
                due = add_days(start, u64::from(duration.max(1)));
            }

            cursor = add_days(due, 1);
            task.with_schedule(start, due)
        })
        .collect()
}

/// Date arithmetic that saturates at the end of the calendar instead of panicking.
fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
