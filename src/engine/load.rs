//! Load aggregation: raw counts to five weighted-sum scores.

use crate::config::RamWeights;
use crate::models::{LoadScores, WorkItemCounts};

pub const MAX_SCORE: f64 = 100.0;

/// Above this many open tasks executive load jumps to a flat penalty.
const EXECUTIVE_TASK_CUTOFF: u32 = 10;
/// More open projects than this makes the Lion anxious on its own.
const ANXIETY_PROJECT_CUTOFF: u32 = 3;

/// Clamp a raw score into `[0, 100]`.
pub fn clamp_score(raw: f64) -> f64 {
    raw.clamp(0.0, MAX_SCORE)
}

/// Compute all five load scores for the given counts.
pub fn compute_load_scores(counts: &WorkItemCounts, weights: &RamWeights) -> LoadScores {
    let projects = f64::from(counts.open_projects);
    let tasks = f64::from(counts.open_tasks);
    let dumps = f64::from(counts.unprocessed_dumps);
    let overdue = f64::from(counts.overdue_tasks);
    let blocked = f64::from(counts.blocked_tasks);
    let setbacks = f64::from(counts.setback_tasks);

    let ram_usage = projects * weights.project
        + tasks * weights.task
        + dumps * weights.dump
        + overdue * weights.overdue;

    let emotional_load = setbacks * 20.0 + blocked * 15.0 + overdue * 10.0;

    let logic_load = tasks * 5.0 + dumps * 15.0;

    let project_anxiety = if counts.open_projects > ANXIETY_PROJECT_CUTOFF {
        20.0
    } else {
        0.0
    };
    let anxiety_level = overdue * 25.0 + blocked * 10.0 + project_anxiety;

    let task_executive = if counts.open_tasks > EXECUTIVE_TASK_CUTOFF {
        30.0
    } else {
        tasks * 3.0
    };
    let executive_load = projects * 10.0 + task_executive + dumps * 12.0 + blocked * 8.0;

    LoadScores {
        ram_usage: clamp_score(ram_usage),
        emotional_load: clamp_score(emotional_load),
        logic_load: clamp_score(logic_load),
        anxiety_level: clamp_score(anxiety_level),
        executive_load: clamp_score(executive_load),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(counts: WorkItemCounts) -> LoadScores {
        compute_load_scores(&counts, &RamWeights::default())
    }

    #[test]
    fn zero_counts_give_zero_scores() {
        assert_eq!(scores(WorkItemCounts::default()), LoadScores::default());
    }

    #[test]
    fn ram_usage_uses_configured_weights() {
        let counts = WorkItemCounts {
            open_projects: 2,
            open_tasks: 4,
            unprocessed_dumps: 1,
            overdue_tasks: 1,
            ..Default::default()
        };
        // 2*15 + 4*3 + 1*5 + 1*10
        assert_eq!(scores(counts).ram_usage, 57.0);
    }

    #[test]
    fn emotional_load_weights_setbacks_heaviest() {
        let counts = WorkItemCounts {
            setback_tasks: 1,
            blocked_tasks: 1,
            overdue_tasks: 1,
            ..Default::default()
        };
        assert_eq!(scores(counts).emotional_load, 45.0);
    }

    #[test]
    fn anxiety_adds_flat_penalty_above_three_projects() {
        let three = WorkItemCounts {
            open_projects: 3,
            ..Default::default()
        };
        let four = WorkItemCounts {
            open_projects: 4,
            ..Default::default()
        };
        assert_eq!(scores(three).anxiety_level, 0.0);
        assert_eq!(scores(four).anxiety_level, 20.0);
    }

    #[test]
    fn executive_task_component_caps_past_ten_tasks() {
        let ten = WorkItemCounts {
            open_tasks: 10,
            ..Default::default()
        };
        let eleven = WorkItemCounts {
            open_tasks: 11,
            ..Default::default()
        };
        assert_eq!(scores(ten).executive_load, 30.0);
        assert_eq!(scores(eleven).executive_load, 30.0);
    }

    #[test]
    fn every_score_is_clamped() {
        let counts = WorkItemCounts {
            open_projects: u32::MAX,
            open_tasks: u32::MAX,
            unprocessed_dumps: u32::MAX,
            overdue_tasks: u32::MAX,
            blocked_tasks: u32::MAX,
            setback_tasks: u32::MAX,
        };
        let s = scores(counts);
        for score in [
            s.ram_usage,
            s.emotional_load,
            s.logic_load,
            s.anxiety_level,
            s.executive_load,
        ] {
            assert_eq!(score, MAX_SCORE);
        }
    }
}
