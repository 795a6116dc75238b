//! Task scheduler: longest-processing-time-first over a fixed number of lanes.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{AppError, Result};

pub const MIN_LANES: usize = 1;
pub const MAX_LANES: usize = 10;
/// Longest accepted task, one year in hours.
pub const MAX_DURATION: u32 = 24 * 366;

/// One `name,duration` line, duration in hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub name: String,
    /// Hours from the plan start.
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lane {
    pub tasks: Vec<ScheduledTask>,
    pub load: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub lanes: Vec<Lane>,
    pub makespan: u32,
}

/// Parse the saved task list. Blank lines and `#` comments are skipped.
pub fn parse_tasks(data: &str) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();

    for (idx, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, duration) = line
            .rsplit_once(',')
            .ok_or_else(|| AppError::validation(format!("Line {}: expected 'name,duration'", idx + 1)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation(format!("Line {}: task name is empty", idx + 1)));
        }
        let duration: u32 = duration
            .trim()
            .parse()
            .map_err(|_| AppError::validation(format!("Line {}: '{}' is not a duration", idx + 1, duration.trim())))?;
        if duration == 0 {
            return Err(AppError::validation(format!("Line {}: duration must be positive", idx + 1)));
        }
        if duration > MAX_DURATION {
            return Err(AppError::validation(format!(
                "Line {}: duration cannot exceed {MAX_DURATION} hours",
                idx + 1
            )));
        }

        tasks.push(Task {
            name: name.to_string(),
            duration,
        });
    }

    Ok(tasks)
}

/// Assign tasks longest-first to the least loaded lane.
pub fn plan(tasks: &[Task], lanes: usize) -> Result<Plan> {
    if !(MIN_LANES..=MAX_LANES).contains(&lanes) {
        return Err(AppError::validation(format!(
            "Lane count must be between {MIN_LANES} and {MAX_LANES}"
        )));
    }

    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|a, b| b.duration.cmp(&a.duration));

    let mut result = vec![Lane::default(); lanes];
    for task in ordered {
        // min_by_key keeps the first minimum, so ties go to the lowest lane
        let lane = result
            .iter_mut()
            .min_by_key(|lane| lane.load)
            .ok_or_else(|| AppError::validation("No lanes"))?;
        let start = lane.load;
        lane.load = start
            .checked_add(task.duration)
            .ok_or_else(|| AppError::validation(format!("Schedule too long at task '{}'", task.name)))?;
        lane.tasks.push(ScheduledTask {
            name: task.name.clone(),
            start,
            end: lane.load,
        });
    }

    let makespan = result.iter().map(|l| l.load).max().unwrap_or(0);
    Ok(Plan {
        lanes: result,
        makespan,
    })
}

/// Wall-clock time `hours` after midnight of `start`, `None` past the calendar range.
pub fn at(start: NaiveDate, hours: u32) -> Option<NaiveDateTime> {
    start
        .and_time(chrono::NaiveTime::MIN)
        .checked_add_signed(Duration::hours(i64::from(hours)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tasks() {
        let tasks = parse_tasks("# chores\nwash, 2\n\nshop,3").unwrap();
        assert_eq!(
            tasks,
            vec![
                Task {
                    name: "wash".to_string(),
                    duration: 2
                },
                Task {
                    name: "shop".to_string(),
                    duration: 3
                },
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_line() {
        let err = parse_tasks("ok,1\nbroken").unwrap_err();
        assert!(err.to_string().contains("Line 2"));

        let err = parse_tasks("a,zero").unwrap_err();
        assert!(err.to_string().contains("not a duration"));

        assert!(parse_tasks("a,0").is_err());
        assert!(parse_tasks(",4").is_err());
    }

    #[test]
    fn test_plan_balances_lanes() {
        let tasks = parse_tasks("a,5\nb,4\nc,3\nd,3\ne,3").unwrap();
        let plan = plan(&tasks, 2).unwrap();

        // LPT: a->0, b->1, c->1 (7), d->0 (8), e->1 (10)
        assert_eq!(plan.lanes[0].load, 8);
        assert_eq!(plan.lanes[1].load, 10);
        assert_eq!(plan.makespan, 10);

        let placed: usize = plan.lanes.iter().map(|l| l.tasks.len()).sum();
        assert_eq!(placed, tasks.len());
    }

    #[test]
    fn test_tasks_are_contiguous_within_lane() {
        let tasks = parse_tasks("a,2\nb,2\nc,2").unwrap();
        let plan = plan(&tasks, 1).unwrap();

        let lane = &plan.lanes[0];
        assert_eq!(lane.tasks[0].start, 0);
        for pair in lane.tasks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(plan.makespan, 6);
    }

    #[test]
    fn test_lane_bounds() {
        assert!(plan(&[], 0).is_err());
        assert!(plan(&[], 11).is_err());
        assert_eq!(plan(&[], 3).unwrap().makespan, 0);
    }

    #[test]
    fn test_at() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(at(day, 26).unwrap().to_string(), "2024-01-02 02:00:00");

        let last = NaiveDate::MAX;
        assert!(at(last, 48).is_none());
    }

    #[test]
    fn test_huge_durations_rejected() {
        let err = parse_tasks("a,5\nb,3000000000").unwrap_err();
        assert!(err.to_string().contains("Line 2"));
        assert!(err.to_string().contains("cannot exceed"));

        assert!(parse_tasks(&format!("a,{MAX_DURATION}")).is_ok());
    }

    #[test]
    fn test_plan_reports_overflow() {
        let tasks = vec![
            Task {
                name: "a".to_string(),
                duration: 3_000_000_000,
            },
            Task {
                name: "b".to_string(),
                duration: 3_000_000_000,
            },
        ];
        let err = plan(&tasks, 1).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Two lanes keep each load in range
        assert_eq!(plan(&tasks, 2).unwrap().makespan, 3_000_000_000);
    }
}
