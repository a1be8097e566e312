use hushcall_core::domain::AllowEntryId;
use hushcall_store::error::StoreErrorKind;
use hushcall_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

#[test]
fn add_keeps_number_as_entered() {
    let store = store();
    let entry = store
        .allow_list()
        .add(1_700_000_000, "  (415) 555-2671 ")
        .expect("add");
    assert_eq!(entry.phone_number, "(415) 555-2671");
    assert!(entry.is_active);

    let fetched = store
        .allow_list()
        .get(entry.id)
        .expect("get")
        .expect("entry exists");
    assert_eq!(fetched, entry);
}

#[test]
fn add_rejects_blank_number() {
    let store = store();
    let err = store.allow_list().add(1_700_000_000, "   ").unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::InvalidInput);
}

#[test]
fn list_active_skips_disabled_entries() {
    let store = store();
    let repo = store.allow_list();
    let first = repo.add(1_700_000_000, "+14155552671").expect("add first");
    let second = repo.add(1_700_000_010, "+442070313000").expect("add second");

    let disabled = repo.set_active(first.id, false).expect("disable");
    assert!(!disabled.is_active);

    let active = repo.list_active().expect("list active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);

    let all = repo.list(true).expect("list all");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);

    repo.set_active(first.id, true).expect("enable");
    assert_eq!(repo.list_active().expect("list active").len(), 2);
}

#[test]
fn missing_entries_are_not_found() {
    let store = store();
    let missing = AllowEntryId::new();
    assert_eq!(
        store.allow_list().set_active(missing, false).unwrap_err().kind(),
        StoreErrorKind::NotFound
    );
    assert_eq!(
        store.allow_list().delete(missing).unwrap_err().kind(),
        StoreErrorKind::NotFound
    );
}

#[test]
fn delete_removes_entry() {
    let store = store();
    let entry = store
        .allow_list()
        .add(1_700_000_000, "+14155552671")
        .expect("add");
    store.allow_list().delete(entry.id).expect("delete");
    assert!(store.allow_list().get(entry.id).expect("get").is_none());
}
