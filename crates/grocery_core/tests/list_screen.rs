use grocery_core::{Filter, ListScreen, SnackbarAction, TodoItem, TodoStore, TodoViewModel};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

fn screen() -> ListScreen {
    let store = Arc::new(TodoStore::open_in_memory().unwrap());
    ListScreen::new(TodoViewModel::new(store, &Handle::current()))
}

async fn items(screen: &ListScreen) -> Vec<TodoItem> {
    screen.view_model().settled().await;
    screen.view_model().todo_list().current().to_vec()
}

async fn add(screen: &mut ListScreen, name: &str, quantity: &str) -> bool {
    screen.open_add_dialog();
    screen.dialog_mut().name = name.to_string();
    screen.dialog_mut().quantity = quantity.to_string();
    let submitted = screen.submit_add_dialog();
    screen.view_model().settled().await;
    submitted
}

#[tokio::test]
async fn milk_bread_toggle_filter_walkthrough() {
    let mut screen = screen();
    assert!(add(&mut screen, "Milk", "2L").await);
    assert!(add(&mut screen, "Bread", "1 loaf").await);

    let list = items(&screen).await;
    let names: Vec<_> = list.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["Bread", "Milk"]);

    screen.toggle(&list[0]);
    assert_eq!(screen.snackbar().unwrap().message, "Task done");
    let list = items(&screen).await;
    assert!(list[0].is_done);
    assert!(!list[1].is_done);

    screen.set_filter(Filter::Done);
    let rows = screen.rows(&list);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Bread");
    assert_eq!(rows[0].quantity_label, "Qty: 1 loaf");

    screen.set_filter(Filter::All);
    assert_eq!(screen.visible_items(&list), list);
}

#[tokio::test]
async fn blank_dialog_input_keeps_dialog_open_and_list_unchanged() {
    let mut screen = screen();
    assert!(!add(&mut screen, "Milk", "   ").await);
    assert!(screen.dialog().is_open());
    assert!(!add(&mut screen, "", "2L").await);

    screen.cancel_add_dialog();
    assert!(!screen.dialog().is_open());
    assert!(items(&screen).await.is_empty());
}

#[tokio::test]
async fn toggling_done_item_announces_not_done() {
    let mut screen = screen();
    add(&mut screen, "Eggs", "12").await;
    let eggs = items(&screen).await[0].clone();

    screen.toggle(&eggs);
    let done = items(&screen).await[0].clone();
    screen.toggle(&done);
    assert_eq!(screen.snackbar().unwrap().message, "Task not done");

    let restored = items(&screen).await[0].clone();
    assert_eq!(restored, eggs);
}

#[tokio::test]
async fn undo_recreates_deleted_item_as_new_record() {
    let mut screen = screen();
    add(&mut screen, "Milk", "2L").await;
    add(&mut screen, "Bread", "1 loaf").await;
    let list = items(&screen).await;
    let milk = list[1].clone();
    screen.toggle(&milk);
    let milk = items(&screen).await[1].clone();
    assert!(milk.is_done);

    screen.delete(&milk);
    let snackbar = screen.snackbar().unwrap();
    assert_eq!(snackbar.message, "Item deleted");
    assert_eq!(snackbar.action, Some(SnackbarAction::Undo));
    let after_delete = items(&screen).await;
    assert_eq!(after_delete.len(), 1);
    assert_eq!(after_delete[0].name, "Bread");

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(screen.undo());
    assert!(screen.snackbar().is_none());

    let after_undo = items(&screen).await;
    assert_eq!(after_undo.len(), 2);
    let revived = &after_undo[0];
    assert_eq!(revived.name, milk.name);
    assert_eq!(revived.quantity, milk.quantity);
    assert_ne!(revived.id, milk.id);
    assert!(revived.created_at > milk.created_at);
    assert!(!revived.is_done);

    assert!(!screen.undo());
}

#[tokio::test]
async fn newer_notification_replaces_pending_undo() {
    let mut screen = screen();
    add(&mut screen, "Milk", "2L").await;
    add(&mut screen, "Bread", "1 loaf").await;
    let list = items(&screen).await;

    screen.delete(&list[1]);
    screen.toggle(&list[0]);
    assert!(!screen.undo());

    let remaining = items(&screen).await;
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].is_done);
}

#[tokio::test]
async fn status_notification_expires_and_dismiss_keeps_mutation() {
    let mut screen = screen();
    add(&mut screen, "Milk", "2L").await;
    let milk = items(&screen).await[0].clone();

    screen.toggle(&milk);
    screen.expire_snackbar(Instant::now());
    assert!(screen.snackbar().is_some());
    screen.expire_snackbar(Instant::now() + Duration::from_secs(5));
    assert!(screen.snackbar().is_none());

    screen.delete(&milk);
    screen.dismiss_snackbar();
    assert!(screen.snackbar().is_none());
    assert!(items(&screen).await.is_empty());
}
