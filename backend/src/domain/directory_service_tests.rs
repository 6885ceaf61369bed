//! Tests for the contact directory service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{ErrorCode, PHONE_MAX};
use crate::domain::ports::{InMemoryContactRepository, MockContactRepository};

const SECRET: &str = "correct horse";

fn contact(phone: &str, name: &str) -> Contact {
    Contact::try_from_strings(phone, name).expect("valid contact")
}

fn add_request(admin_pass: &str, phone: &str, name: &str) -> AddContactRequest {
    AddContactRequest {
        admin_pass: admin_pass.to_owned(),
        phone: phone.to_owned(),
        name: name.to_owned(),
    }
}

fn remove_request(admin_pass: &str, phone: &str) -> RemoveContactRequest {
    RemoveContactRequest {
        admin_pass: admin_pass.to_owned(),
        phone: phone.to_owned(),
    }
}

fn service_over<R: ContactRepository>(repository: R) -> ContactDirectoryService<R> {
    ContactDirectoryService::new(Arc::new(repository), AdminSecret::new(SECRET))
}

#[fixture]
fn repository() -> Arc<InMemoryContactRepository> {
    Arc::new(InMemoryContactRepository::with_contacts([
        contact("555-0100", "Alice Smith"),
        contact("555-0101", "Bob Jones"),
    ]))
}

fn service(
    repository: &Arc<InMemoryContactRepository>,
) -> ContactDirectoryService<InMemoryContactRepository> {
    ContactDirectoryService::new(Arc::clone(repository), AdminSecret::new(SECRET))
}

#[rstest]
#[tokio::test]
async fn list_contacts_reports_total_count(repository: Arc<InMemoryContactRepository>) {
    let listing = service(&repository)
        .list_contacts()
        .await
        .expect("listing succeeds");
    assert_eq!(listing.total_count, 2);
    assert_eq!(listing.contacts.len(), 2);
}

#[rstest]
#[tokio::test]
async fn phone_search_returns_exact_match(repository: Arc<InMemoryContactRepository>) {
    let listing = service(&repository)
        .search_contacts(&SearchRequest::new("555-0101", SearchType::Phone))
        .await
        .expect("search succeeds");
    assert_eq!(listing.contacts, vec![contact("555-0101", "Bob Jones")]);
    assert_eq!(listing.total_count, 2);
}

#[rstest]
#[tokio::test]
async fn phone_search_does_not_match_substrings(repository: Arc<InMemoryContactRepository>) {
    let listing = service(&repository)
        .search_contacts(&SearchRequest::new("555", SearchType::Phone))
        .await
        .expect("search succeeds");
    assert!(listing.contacts.is_empty());
}

#[rstest]
#[case("smith")]
#[case("SMITH")]
#[tokio::test]
async fn name_search_ignores_case(
    repository: Arc<InMemoryContactRepository>,
    #[case] query: &str,
) {
    let listing = service(&repository)
        .search_contacts(&SearchRequest::new(query, SearchType::Name))
        .await
        .expect("search succeeds");
    assert_eq!(listing.contacts, vec![contact("555-0100", "Alice Smith")]);
}

#[rstest]
#[case(SearchType::Name)]
#[case(SearchType::Phone)]
#[tokio::test]
async fn blank_query_matches_nothing(
    repository: Arc<InMemoryContactRepository>,
    #[case] search_type: SearchType,
) {
    let listing = service(&repository)
        .search_contacts(&SearchRequest::new("   ", search_type))
        .await
        .expect("search succeeds");
    assert!(listing.contacts.is_empty());
    assert_eq!(listing.total_count, 2);
}

#[rstest]
#[tokio::test]
async fn add_contact_stores_trimmed_fields(repository: Arc<InMemoryContactRepository>) {
    let added = service(&repository)
        .add_contact(add_request(SECRET, " 123 ", " Bob "))
        .await
        .expect("add succeeds");
    assert_eq!(added, contact("123", "Bob"));
    assert_eq!(repository.count().await.expect("count"), 3);
}

#[rstest]
#[tokio::test]
async fn add_contact_with_wrong_password_does_not_mutate(
    repository: Arc<InMemoryContactRepository>,
) {
    let err = service(&repository)
        .add_contact(add_request("wrong", "123", "Bob"))
        .await
        .expect_err("wrong password must fail");
    assert_eq!(err.code(), ErrorCode::WrongPassword);
    assert_eq!(repository.count().await.expect("count"), 2);
}

#[rstest]
#[case("", "Bob")]
#[case("123", "  ")]
#[tokio::test]
async fn add_contact_requires_both_fields(
    repository: Arc<InMemoryContactRepository>,
    #[case] phone: &str,
    #[case] name: &str,
) {
    let err = service(&repository)
        .add_contact(add_request(SECRET, phone, name))
        .await
        .expect_err("blank field must fail");
    assert_eq!(err.code(), ErrorCode::MissingField);
    assert_eq!(err.message(), ADD_FIELDS_REQUIRED);
}

#[rstest]
#[tokio::test]
async fn add_contact_rejects_overlong_name(repository: Arc<InMemoryContactRepository>) {
    let err = service(&repository)
        .add_contact(add_request(SECRET, "123", &"x".repeat(101)))
        .await
        .expect_err("overlong name must fail");
    assert_eq!(err.code(), ErrorCode::InvalidField);
    assert_eq!(err.message(), "Name must be at most 100 characters");
}

#[rstest]
#[tokio::test]
async fn add_contact_reports_duplicate_phone(repository: Arc<InMemoryContactRepository>) {
    let err = service(&repository)
        .add_contact(add_request(SECRET, "555-0100", "Someone Else"))
        .await
        .expect_err("duplicate must fail");
    assert_eq!(err.code(), ErrorCode::DuplicateKey);
    assert_eq!(err.message(), "Phone 555-0100 already exists!");
}

#[rstest]
#[tokio::test]
async fn remove_contact_returns_removed_entry(repository: Arc<InMemoryContactRepository>) {
    let removed = service(&repository)
        .remove_contact(remove_request(SECRET, "555-0100"))
        .await
        .expect("remove succeeds");
    assert_eq!(removed.name().as_ref(), "Alice Smith");
    assert_eq!(repository.count().await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn remove_contact_with_wrong_password_does_not_mutate(
    repository: Arc<InMemoryContactRepository>,
) {
    let err = service(&repository)
        .remove_contact(remove_request("", "555-0100"))
        .await
        .expect_err("wrong password must fail");
    assert_eq!(err.code(), ErrorCode::WrongPassword);
    assert_eq!(repository.count().await.expect("count"), 2);
}

#[rstest]
#[tokio::test]
async fn remove_contact_reports_missing_phone(repository: Arc<InMemoryContactRepository>) {
    let err = service(&repository)
        .remove_contact(remove_request(SECRET, "999"))
        .await
        .expect_err("missing contact must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "No contact with phone 999");
}

#[rstest]
#[tokio::test]
async fn remove_contact_with_overlong_phone_is_not_found(
    repository: Arc<InMemoryContactRepository>,
) {
    let phone = "9".repeat(PHONE_MAX + 1);
    let err = service(&repository)
        .remove_contact(remove_request(SECRET, &format!(" {phone} ")))
        .await
        .expect_err("unstorable phone cannot match");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), format!("No contact with phone {phone}"));
    assert_eq!(repository.count().await.expect("count"), 2);
}

#[tokio::test]
async fn add_contact_maps_query_failure_to_store_failure() {
    let mut repository = MockContactRepository::new();
    repository
        .expect_insert()
        .times(1)
        .returning(|_| Err(ContactRepositoryError::query("disk I/O error")));

    let err = service_over(repository)
        .add_contact(add_request(SECRET, "123", "Bob"))
        .await
        .expect_err("store failure must surface");
    assert_eq!(err.code(), ErrorCode::StoreFailure);
    assert_eq!(err.message(), "Add failed: disk I/O error");
}

#[tokio::test]
async fn remove_contact_maps_connection_failure_to_unavailable() {
    let mut repository = MockContactRepository::new();
    repository
        .expect_delete()
        .times(1)
        .returning(|_| Err(ContactRepositoryError::connection("pool timed out")));

    let err = service_over(repository)
        .remove_contact(remove_request(SECRET, "123"))
        .await
        .expect_err("store failure must surface");
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert_eq!(err.message(), "Delete failed: pool timed out");
}

#[tokio::test]
async fn wrong_password_never_reaches_repository() {
    let mut repository = MockContactRepository::new();
    repository.expect_insert().times(0);
    repository.expect_delete().times(0);
    let service = service_over(repository);

    let add = service
        .add_contact(add_request("nope", "123", "Bob"))
        .await
        .expect_err("add must be rejected");
    let remove = service
        .remove_contact(remove_request("nope", "123"))
        .await
        .expect_err("remove must be rejected");
    assert_eq!(add.code(), ErrorCode::WrongPassword);
    assert_eq!(remove.code(), ErrorCode::WrongPassword);
}

#[tokio::test]
async fn listing_surfaces_count_failure() {
    let mut repository = MockContactRepository::new();
    repository.expect_list_all().returning(|| Ok(Vec::new()));
    repository
        .expect_count()
        .returning(|| Err(ContactRepositoryError::query("no such table: contacts")));

    let err = service_over(repository)
        .list_contacts()
        .await
        .expect_err("count failure must surface");
    assert_eq!(err.code(), ErrorCode::StoreFailure);
    assert_eq!(err.message(), "Count failed: no such table: contacts");
}
