mod common;

use pretty_assertions::assert_eq;

use shiftdesk::database::filters::RequestFilter;
use shiftdesk::database::models::{RequestStatus, ShiftRequestInput, UpdateShiftRequestInput};
use shiftdesk::database::repositories::ShiftRequestRepository;
use shiftdesk::error::AppError;

use common::*;

#[actix_web::test]
async fn test_new_request_starts_pending() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;

    let request = repo
        .create_request(ShiftRequestInput {
            employee_id: employee.id,
            slot_id: slot.id,
            notes: Some("available all day".to_string()),
        })
        .await
        .expect("create should succeed");

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.employee_id, employee.id);
    assert_eq!(request.slot_id, slot.id);
    assert_eq!(request.notes.as_deref(), Some("available all day"));
}

#[actix_web::test]
async fn test_request_requires_existing_employee_and_slot() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;

    let err = repo
        .create_request(ShiftRequestInput {
            employee_id: 9999,
            slot_id: slot.id,
            notes: None,
        })
        .await
        .expect_err("unknown employee should fail");
    assert!(matches!(err, AppError::NotFound(_)));

    let err = repo
        .create_request(ShiftRequestInput {
            employee_id: employee.id,
            slot_id: 9999,
            notes: None,
        })
        .await
        .expect_err("unknown slot should fail");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_web::test]
async fn test_second_pending_request_for_same_pair_rejected() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;

    let input = ShiftRequestInput {
        employee_id: employee.id,
        slot_id: slot.id,
        notes: None,
    };
    repo.create_request(input.clone()).await.expect("first");

    let err = repo
        .create_request(input)
        .await
        .expect_err("second pending request should fail");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[actix_web::test]
async fn test_denied_request_does_not_block_a_new_one() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;

    let first = repo
        .create_request(ShiftRequestInput {
            employee_id: employee.id,
            slot_id: slot.id,
            notes: None,
        })
        .await
        .expect("first");

    repo.update_request(
        first.id,
        UpdateShiftRequestInput {
            status: Some(RequestStatus::Denied),
            notes: None,
        },
    )
    .await
    .expect("update")
    .expect("request exists");

    // Only pending requests count toward the duplicate check.
    let second = repo
        .create_request(ShiftRequestInput {
            employee_id: employee.id,
            slot_id: slot.id,
            notes: None,
        })
        .await
        .expect("new request after denial");
    assert_eq!(second.status, RequestStatus::Pending);
}

#[actix_web::test]
async fn test_direct_approval_creates_no_assignment() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;

    let request = repo
        .create_request(ShiftRequestInput {
            employee_id: employee.id,
            slot_id: slot.id,
            notes: None,
        })
        .await
        .expect("request");

    let updated = repo
        .update_request(
            request.id,
            UpdateShiftRequestInput {
                status: Some(RequestStatus::Approved),
                notes: None,
            },
        )
        .await
        .expect("update")
        .expect("request exists");

    assert_eq!(updated.status, RequestStatus::Approved);
    // The edit is bookkeeping only: no seat taken, no assignment row.
    assert_eq!(slot_taken(&db.pool, slot.id).await, 0);
    assert_eq!(assignment_count_for_slot(&db.pool, slot.id).await, 0);
}

#[actix_web::test]
async fn test_request_listing_filters_by_status_and_employee() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let alice = create_test_employee(&db.pool).await;
    let bob = create_test_employee(&db.pool).await;
    let slot_a = create_test_slot(&db.pool, 1).await;
    let slot_b = create_test_slot(&db.pool, 1).await;

    let approved = repo
        .create_request(ShiftRequestInput {
            employee_id: alice.id,
            slot_id: slot_a.id,
            notes: None,
        })
        .await
        .expect("request");
    repo.update_request(
        approved.id,
        UpdateShiftRequestInput {
            status: Some(RequestStatus::Approved),
            notes: None,
        },
    )
    .await
    .expect("update")
    .expect("exists");

    repo.create_request(ShiftRequestInput {
        employee_id: alice.id,
        slot_id: slot_b.id,
        notes: None,
    })
    .await
    .expect("request");
    repo.create_request(ShiftRequestInput {
        employee_id: bob.id,
        slot_id: slot_a.id,
        notes: None,
    })
    .await
    .expect("request");

    let pending = repo
        .find_by_filter(RequestFilter {
            employee_id: None,
            status: Some(RequestStatus::Pending),
        })
        .await
        .expect("list");
    assert_eq!(pending.len(), 2);

    let alices = repo
        .find_by_filter(RequestFilter {
            employee_id: Some(alice.id),
            status: None,
        })
        .await
        .expect("list");
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|r| r.employee_id == alice.id));
    assert_eq!(alices[0].employee_name, alice.name);
}

#[actix_web::test]
async fn test_delete_request() {
    let db = TestDb::new().await.expect("test db");
    let repo = ShiftRequestRepository::new(db.pool.clone());

    let employee = create_test_employee(&db.pool).await;
    let slot = create_test_slot(&db.pool, 1).await;

    let request = repo
        .create_request(ShiftRequestInput {
            employee_id: employee.id,
            slot_id: slot.id,
            notes: None,
        })
        .await
        .expect("request");

    assert!(repo.delete_request(request.id).await.expect("delete"));
    assert!(!repo.delete_request(request.id).await.expect("delete again"));
    assert!(repo
        .find_by_id(request.id)
        .await
        .expect("lookup")
        .is_none());
}
