mod common;

use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

use shiftdesk::database::filters::SlotFilter;
use shiftdesk::database::models::{ShiftSlotInput, UpdateShiftSlotInput};
use shiftdesk::database::repositories::{AssignmentRepository, ShiftSlotRepository};
use shiftdesk::error::AppError;

use common::*;

fn slot_input(date: NaiveDate, start: (u32, u32), end: (u32, u32), amount: i64) -> ShiftSlotInput {
    ShiftSlotInput {
        shift_date: date,
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        slots_amount: amount,
    }
}

#[actix_web::test]
async fn test_new_slot_starts_empty() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftSlotRepository::new(db.pool.clone());

    let slot = repo
        .create_slot(slot_input(
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            (8, 0),
            (16, 0),
            4,
        ))
        .await
        .expect("create");

    assert_eq!(slot.slots_amount, 4);
    assert_eq!(slot.slots_taken, 0);
}

#[actix_web::test]
async fn test_slot_requires_positive_capacity() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftSlotRepository::new(db.pool.clone());

    let err = repo
        .create_slot(slot_input(
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            (8, 0),
            (16, 0),
            0,
        ))
        .await
        .expect_err("zero capacity should fail");

    assert!(matches!(err, AppError::BadRequest(_)));
}

#[actix_web::test]
async fn test_slot_filters_by_date_and_time() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftSlotRepository::new(db.pool.clone());

    let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
    let friday = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();

    repo.create_slot(slot_input(monday, (8, 0), (16, 0), 2))
        .await
        .expect("slot");
    repo.create_slot(slot_input(tuesday, (14, 0), (22, 0), 2))
        .await
        .expect("slot");
    repo.create_slot(slot_input(friday, (8, 0), (16, 0), 2))
        .await
        .expect("slot");

    let on_monday = repo
        .find_by_filter(SlotFilter {
            date: Some(monday),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(on_monday.len(), 1);
    assert_eq!(on_monday[0].shift_date, monday);

    let early_week = repo
        .find_by_filter(SlotFilter {
            start_date: Some(monday),
            end_date: Some(tuesday),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(early_week.len(), 2);

    let afternoons = repo
        .find_by_filter(SlotFilter {
            start_after: Some(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(afternoons.len(), 1);
    assert_eq!(afternoons[0].shift_date, tuesday);
}

#[actix_web::test]
async fn test_update_slot_keeps_unset_fields() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftSlotRepository::new(db.pool.clone());

    let slot = create_test_slot(&db.pool, 3).await;

    let updated = repo
        .update_slot(
            slot.id,
            UpdateShiftSlotInput {
                slots_amount: Some(6),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("slot exists");

    assert_eq!(updated.slots_amount, 6);
    assert_eq!(updated.shift_date, slot.shift_date);
    assert_eq!(updated.start_time, slot.start_time);
}

#[actix_web::test]
async fn test_capacity_cannot_shrink_below_taken_seats() {
    let db = TestDb::new().await.expect("test db");
    let slots = ShiftSlotRepository::new(db.pool.clone());
    let assignments = AssignmentRepository::new(db.pool.clone());

    let slot = create_test_slot(&db.pool, 3).await;
    for _ in 0..2 {
        let employee = create_test_employee(&db.pool).await;
        assignments
            .create_assignment(employee.id, slot.id)
            .await
            .expect("assignment");
    }

    let err = slots
        .update_slot(
            slot.id,
            UpdateShiftSlotInput {
                slots_amount: Some(1),
                ..Default::default()
            },
        )
        .await
        .expect_err("shrinking below taken should fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    // Shrinking to exactly the taken count is fine.
    let updated = slots
        .update_slot(
            slot.id,
            UpdateShiftSlotInput {
                slots_amount: Some(2),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("slot exists");
    assert_eq!(updated.slots_amount, 2);
}

#[actix_web::test]
async fn test_delete_slot_removes_dependents() {
    let db = TestDb::new().await.expect("test db");
    let slots = ShiftSlotRepository::new(db.pool.clone());
    let assignments = AssignmentRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;
    let assignment = assignments
        .create_assignment(employee.id, slot.id)
        .await
        .expect("assignment");

    assert!(slots.delete_slot(slot.id).await.expect("delete"));

    assert!(slots.find_by_id(slot.id).await.expect("lookup").is_none());
    assert!(assignments
        .get_assignment_by_id(assignment.id)
        .await
        .expect("lookup")
        .is_none());
    assert!(!slots.delete_slot(slot.id).await.expect("delete again"));
}
