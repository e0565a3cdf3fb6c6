use chrono::NaiveDate;

use crate::{
    store::entities::{Activity, ActivityType},
    utils::{
        percentage::Percentage,
        time::{same_month, same_week},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeUsage {
    pub kind: ActivityType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStats {
    pub total: usize,
    pub completed: usize,
    pub this_week: usize,
    pub completed_this_week: usize,
    pub this_month: usize,
    pub completed_this_month: usize,
    pub top_type: Option<TypeUsage>,
    pub completion_rate: Percentage,
}

/// `round(100 * completed / total)`, 0% for no activities.
pub fn completion_rate(activities: &[Activity]) -> Percentage {
    let completed = activities.iter().filter(|v| v.completed).count();
    Percentage::of(completed, activities.len())
}

/// Count per activity type, in order of first appearance in the collection.
pub fn type_breakdown(activities: &[Activity]) -> Vec<TypeUsage> {
    let mut usages = Vec::<TypeUsage>::with_capacity(ActivityType::ALL.len());
    for activity in activities {
        match usages.iter_mut().find(|v| v.kind == activity.kind) {
            Some(usage) => usage.count += 1,
            None => usages.push(TypeUsage {
                kind: activity.kind,
                count: 1,
            }),
        }
    }
    usages
}

/// Most frequent type. Ties go to the type that appears first in the collection.
pub fn top_type(activities: &[Activity]) -> Option<TypeUsage> {
    type_breakdown(activities)
        .into_iter()
        .fold(None, |best: Option<TypeUsage>, usage| match best {
            Some(best) if best.count >= usage.count => Some(best),
            _ => Some(usage),
        })
}

/// Summary shown on the statistics page. Weeks start on Saturday.
pub fn activity_stats(activities: &[Activity], today: NaiveDate) -> ActivityStats {
    let mut stats = ActivityStats {
        total: activities.len(),
        completed: 0,
        this_week: 0,
        completed_this_week: 0,
        this_month: 0,
        completed_this_month: 0,
        top_type: top_type(activities),
        completion_rate: completion_rate(activities),
    };

    for activity in activities {
        let done = activity.completed as usize;
        stats.completed += done;
        if same_week(activity.date, today) {
            stats.this_week += 1;
            stats.completed_this_week += done;
        }
        if same_month(activity.date, today) {
            stats.this_month += 1;
            stats.completed_this_month += done;
        }
    }

    stats
}
