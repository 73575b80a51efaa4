//! Lending invariants exercised at the service layer

mod common;

use common::{seed_book, seed_member, test_env, test_state};
use lectern_server::AppError;

#[tokio::test]
async fn borrow_without_copies_is_rejected_and_mutates_nothing() {
    let state = test_state().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Out of Stock", 0).await;

    let result = state.services.lending.borrow(member.id, book.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let after = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(after.copies, 0);

    let borrowed = state.services.lending.borrowed_by_user(member.id).await.unwrap();
    assert!(borrowed.is_empty(), "no borrow record may be created");
}

#[tokio::test]
async fn borrow_of_missing_book_is_not_found() {
    let state = test_state().await;
    let member = seed_member(&state, "reader").await;

    let result = state.services.lending.borrow(member.id, 4242).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn borrow_by_missing_user_is_not_found() {
    let state = test_state().await;
    let book = seed_book(&state, "Unclaimed", 1).await;

    let result = state.services.lending.borrow(4242, book.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let after = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(after.copies, 1, "availability must stay untouched");
}

#[tokio::test]
async fn return_without_outstanding_record_is_not_found_and_mutates_nothing() {
    let state = test_state().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Never Borrowed", 2).await;

    let result = state.services.lending.return_by_book(book.id, member.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let after = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(after.copies, 2);
}

#[tokio::test]
async fn borrow_then_return_restores_availability() {
    let (state, repository) = test_env().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Round Trip", 3).await;

    let record = state.services.lending.borrow(member.id, book.id).await.unwrap();
    assert!(record.is_outstanding());
    assert_eq!(
        state.services.catalog.get_book(book.id).await.unwrap().copies,
        2
    );

    let returned = state.services.lending.return_by_record(record.id).await.unwrap();
    assert_eq!(returned.id, record.id);
    assert!(returned.return_date.is_some());

    // Availability is back where it started and exactly one record
    // made the outstanding-to-returned transition.
    assert_eq!(
        state.services.catalog.get_book(book.id).await.unwrap().copies,
        3
    );
    let stored = repository.borrows.get_by_id(record.id).await.unwrap();
    assert!(stored.return_date.is_some());
    assert_eq!(repository.borrows.count_for_book(book.id).await.unwrap(), 1);
}

#[tokio::test]
async fn single_copy_lifecycle() {
    let state = test_state().await;
    let first = seed_member(&state, "first").await;
    let second = seed_member(&state, "second").await;
    let book = seed_book(&state, "Single Copy", 1).await;

    // First borrow takes the only copy
    let record = state.services.lending.borrow(first.id, book.id).await.unwrap();
    assert!(record.return_date.is_none());
    let held = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(held.copies, 0);
    assert!(held.is_borrowed());

    // Second borrower is turned away
    let denied = state.services.lending.borrow(second.id, book.id).await;
    assert!(matches!(denied, Err(AppError::Conflict(_))));

    // Return frees the copy and stamps the record
    let returned = state.services.lending.return_by_book(book.id, first.id).await.unwrap();
    assert_eq!(returned.id, record.id);
    assert!(returned.return_date.is_some());

    let freed = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(freed.copies, 1);
    assert!(!freed.is_borrowed());

    // Now the second borrower can have it
    state.services.lending.borrow(second.id, book.id).await.unwrap();
}

#[tokio::test]
async fn concurrent_borrows_of_last_copy_admit_exactly_one() {
    let state = test_state().await;
    let first = seed_member(&state, "first").await;
    let second = seed_member(&state, "second").await;
    let book = seed_book(&state, "Contested", 1).await;

    let (a, b) = tokio::join!(
        state.services.lending.borrow(first.id, book.id),
        state.services.lending.borrow(second.id, book.id),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of the competing borrows may win");

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser, Err(AppError::Conflict(_))));

    let after = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(after.copies, 0, "the counter must not go negative");
}

#[tokio::test]
async fn returning_the_same_record_twice_conflicts() {
    let state = test_state().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Once Only", 1).await;

    let record = state.services.lending.borrow(member.id, book.id).await.unwrap();
    state.services.lending.return_by_record(record.id).await.unwrap();

    let again = state.services.lending.return_by_record(record.id).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    // The second attempt must not inflate availability
    let after = state.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(after.copies, 1);
}

#[tokio::test]
async fn return_by_book_closes_the_oldest_outstanding_record() {
    let state = test_state().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Two Copies", 2).await;

    let older = state.services.lending.borrow(member.id, book.id).await.unwrap();
    let newer = state.services.lending.borrow(member.id, book.id).await.unwrap();

    let returned = state.services.lending.return_by_book(book.id, member.id).await.unwrap();
    assert_eq!(returned.id, older.id);

    let outstanding = state.services.lending.borrowed_by_user(member.id).await.unwrap();
    assert_eq!(outstanding.len(), 1);
    assert_eq!(outstanding[0].borrow_id, newer.id);
}

#[tokio::test]
async fn delete_refuses_outstanding_borrows_unless_forced() {
    let (state, repository) = test_env().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Doomed", 1).await;

    state.services.lending.borrow(member.id, book.id).await.unwrap();

    let refused = state.services.catalog.delete_book(book.id, false).await;
    assert!(matches!(refused, Err(AppError::Conflict(_))));
    assert_eq!(repository.borrows.count_for_book(book.id).await.unwrap(), 1);

    // Forced delete removes the book and cascades its borrow history
    state.services.catalog.delete_book(book.id, true).await.unwrap();

    let gone = state.services.catalog.get_book(book.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
    assert_eq!(
        repository.borrows.count_for_book(book.id).await.unwrap(),
        0,
        "no orphaned borrow rows may remain"
    );
}

#[tokio::test]
async fn delete_after_return_needs_no_force() {
    let state = test_state().await;
    let member = seed_member(&state, "reader").await;
    let book = seed_book(&state, "Settled", 1).await;

    let record = state.services.lending.borrow(member.id, book.id).await.unwrap();
    state.services.lending.return_by_record(record.id).await.unwrap();

    state.services.catalog.delete_book(book.id, false).await.unwrap();
}
