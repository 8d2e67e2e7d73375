use grocery_core::db::open_db;
use grocery_core::{NewTodoItem, TodoStore};

#[test]
fn store_reopens_file_with_existing_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery.sqlite3");

    let store = TodoStore::open(&path).unwrap();
    let milk = store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 1))
        .unwrap();
    drop(store);

    let store = TodoStore::open(&path).unwrap();
    assert_eq!(store.snapshot().as_slice(), [milk]);
}

#[test]
fn blank_persisted_row_does_not_block_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery.sqlite3");
    let raw = open_db(&path).unwrap();
    raw.execute(
        "INSERT INTO todo_table (name, quantity, created_at, is_done) VALUES ('  ', '1', 2, 0);",
        [],
    )
    .unwrap();
    drop(raw);

    let store = TodoStore::open(&path).unwrap();
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "  ");
}

#[test]
fn committed_writes_are_reported_when_table_cannot_be_reread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery.sqlite3");
    let store = TodoStore::open(&path).unwrap();
    let milk = store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 10))
        .unwrap();
    let live = store.subscribe();

    // A row whose timestamp is stored as text cannot be decoded on re-read.
    let raw = open_db(&path).unwrap();
    raw.execute(
        "INSERT INTO todo_table (name, quantity, created_at, is_done) VALUES ('Rice', '1kg', 'noon', 0);",
        [],
    )
    .unwrap();

    let bread = store
        .insert(&NewTodoItem::with_timestamp("Bread", "1 loaf", 20))
        .unwrap();
    let stored: i64 = raw
        .query_row(
            "SELECT COUNT(*) FROM todo_table WHERE id = ?1;",
            [bread.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, 1);
    assert!(live.has_changed());
    assert_eq!(store.snapshot().as_slice(), [bread.clone(), milk.clone()]);

    assert!(store.update(&milk.toggled()).unwrap());
    assert!(store.snapshot()[1].is_done);

    assert!(store.delete(&bread).unwrap());
    assert_eq!(store.snapshot().as_slice(), [milk.toggled()]);
}

#[test]
fn insert_publishes_snapshot_with_new_item_first() {
    let store = TodoStore::open_in_memory().unwrap();
    let live = store.subscribe();
    assert!(live.current().is_empty());
    assert!(!live.has_changed());

    store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 1))
        .unwrap();
    let bread = store
        .insert(&NewTodoItem::with_timestamp("Bread", "1 loaf", 2))
        .unwrap();

    assert!(live.has_changed());
    let current = live.current();
    assert_eq!(current.len(), 2);
    assert_eq!(current[0], bread);
}

#[test]
fn noop_mutations_do_not_publish() {
    let store = TodoStore::open_in_memory().unwrap();
    let milk = store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 1))
        .unwrap();
    let live = store.subscribe();

    let ghost = NewTodoItem::with_timestamp("Ghost", "1", 1).into_item(milk.id + 1);
    assert!(!store.update(&ghost).unwrap());
    assert!(!store.delete(&ghost).unwrap());
    assert!(!live.has_changed());
}

#[test]
fn toggle_roundtrip_through_store() {
    let store = TodoStore::open_in_memory().unwrap();
    let milk = store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 1))
        .unwrap();

    assert!(store.update(&milk.toggled()).unwrap());
    let loaded = store.get(milk.id).unwrap().unwrap();
    assert!(loaded.is_done);
    assert_eq!(loaded.toggled(), milk);
    assert_eq!(store.snapshot()[0], loaded);
}

#[tokio::test]
async fn subscriber_wakes_after_delete() {
    let store = TodoStore::open_in_memory().unwrap();
    let milk = store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 1))
        .unwrap();
    let mut live = store.subscribe();

    assert!(store.delete(&milk).unwrap());
    let snapshot = live.changed().await.unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn only_changed_marks_a_snapshot_seen() {
    let store = TodoStore::open_in_memory().unwrap();
    let mut live = store.subscribe();
    store
        .insert(&NewTodoItem::with_timestamp("Milk", "2L", 1))
        .unwrap();

    assert_eq!(live.current().len(), 1);
    assert!(live.has_changed());

    let snapshot = live.changed().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert!(!live.has_changed());
}

#[tokio::test]
async fn changed_returns_none_after_store_drop() {
    let store = TodoStore::open_in_memory().unwrap();
    let mut live = store.subscribe();
    drop(store);
    assert!(live.changed().await.is_none());
}
