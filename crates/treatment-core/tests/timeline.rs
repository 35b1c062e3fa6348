use chrono::{TimeZone, Utc};
use uuid::Uuid;

use treatment_core::models::timeline::{merge_events, EventKind, TimelineEvent};

fn event(kind: EventKind, hour: u32, source_id: Option<Uuid>) -> TimelineEvent {
    TimelineEvent {
        id: Uuid::new_v4(),
        account_id: Uuid::new_v4(),
        kind,
        occurred_at: Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap(),
        title: format!("{kind:?}"),
        detail: None,
        source_id,
    }
}

#[test]
fn empty_input_merges_to_empty() {
    assert!(merge_events(Vec::new()).is_empty());
}

#[test]
fn events_come_back_newest_first() {
    let merged = merge_events(vec![
        event(EventKind::ConditionAdded, 8, None),
        event(EventKind::Chat, 14, None),
        event(EventKind::MedicationStarted, 11, None),
    ]);

    let hours: Vec<u32> = merged
        .iter()
        .map(|e| {
            use chrono::Timelike;
            e.occurred_at.hour()
        })
        .collect();
    assert_eq!(hours, vec![14, 11, 8]);
}

#[test]
fn repeated_source_collapses_to_most_recent() {
    let medication_id = Uuid::new_v4();
    let older = event(EventKind::MedicationStarted, 9, Some(medication_id));
    let newer = event(EventKind::MedicationStarted, 15, Some(medication_id));

    let merged = merge_events(vec![older, newer.clone()]);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, newer.id);
}

#[test]
fn same_source_different_kind_is_kept() {
    let medication_id = Uuid::new_v4();
    let started = event(EventKind::MedicationStarted, 9, Some(medication_id));
    let stopped = event(EventKind::MedicationStopped, 15, Some(medication_id));

    let merged = merge_events(vec![started, stopped]);

    assert_eq!(merged.len(), 2);
}

#[test]
fn sourceless_events_never_collapse() {
    let merged = merge_events(vec![
        event(EventKind::Chat, 9, None),
        event(EventKind::Chat, 9, None),
    ]);

    assert_eq!(merged.len(), 2);
}

#[test]
fn ordering_is_stable_across_permutations() {
    let a = event(EventKind::Chat, 9, None);
    let b = event(EventKind::Chat, 9, None);
    let c = event(EventKind::ConditionAdded, 12, None);

    let first = merge_events(vec![a.clone(), b.clone(), c.clone()]);
    let second = merge_events(vec![c, b, a]);

    let first_ids: Vec<Uuid> = first.iter().map(|e| e.id).collect();
    let second_ids: Vec<Uuid> = second.iter().map(|e| e.id).collect();
    assert_eq!(first_ids, second_ids);
}
