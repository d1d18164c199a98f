use std::fs::File;
use std::path::PathBuf;

use machine_store::{ChangeRow, ItemRow, Store, StoreError, DEFAULT_DB_PATH};
use rusqlite::{params, Connection};
use tempfile::TempDir;

// Each test gets its own directory holding an empty database file.
fn empty_db_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(DEFAULT_DB_PATH);
    File::create(&path).expect("create db file");
    (dir, path)
}

fn change_rows(store: &Store) -> Vec<(String, i64)> {
    store
        .change()
        .all()
        .expect("read change")
        .into_iter()
        .map(|row| (row.denomination, row.quantity))
        .collect()
}

fn item_rows(store: &Store) -> Vec<(String, i64)> {
    store
        .items()
        .all()
        .expect("read items")
        .into_iter()
        .map(|row| (row.name, row.quantity))
        .collect()
}

fn owned(rows: &[(&str, i64)]) -> Vec<(String, i64)> {
    rows.iter()
        .map(|(key, quantity)| (key.to_string(), *quantity))
        .collect()
}

#[test]
fn missing_file_is_not_initialized() {
    let dir = tempfile::tempdir().expect("temp dir");

    let err = Store::open_at(dir.path().join("nope.db")).expect_err("must fail");

    assert!(matches!(err, StoreError::NotInitialized { .. }));
    assert!(err.to_string().contains("nope.db"));
}

#[test]
fn tables_are_empty_before_seeding() {
    let (_dir, path) = empty_db_file();

    let store = Store::open_at(&path).expect("open");

    assert!(store.change().all().expect("read change").is_empty());
    assert!(store.items().all().expect("read items").is_empty());
}

#[test]
fn seeding_loads_default_float_and_stock() {
    let (_dir, path) = empty_db_file();
    let store = Store::open_at(&path).expect("open");

    let report = store.seed_store().expect("seed");

    assert_eq!((report.change_rows, report.item_rows), (8, 3));
    assert_eq!(
        change_rows(&store),
        owned(&[
            ("1p", 100),
            ("2p", 100),
            ("5p", 100),
            ("10p", 100),
            ("20p", 100),
            ("50p", 100),
            ("£1", 100),
            ("£2", 100),
        ])
    );
    assert_eq!(
        item_rows(&store),
        owned(&[
            ("Toilet Roll", 2),
            ("Canned Tomatoes", 0),
            ("Sainsburys Lager", 5),
        ])
    );
}

#[test]
fn seeding_twice_violates_unique_keys() {
    let (_dir, path) = empty_db_file();
    let store = Store::open_at(&path).expect("open");
    store.seed_store().expect("first seed");

    let err = store.seed_store().expect_err("second seed must fail");

    match err {
        StoreError::UniqueConstraintViolation { table, key } => {
            assert_eq!(table, "change");
            assert_eq!(key, "1p");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.change().count().expect("count"), 8);
    assert_eq!(store.items().count().expect("count"), 3);
}

#[test]
fn seeding_survives_reopening_the_file() {
    let (_dir, path) = empty_db_file();
    Store::open_at(&path)
        .expect("open")
        .seed_store()
        .expect("seed");

    let reopened = Store::open_at(&path).expect("reopen");

    assert_eq!(reopened.change().count().expect("count"), 8);
    assert!(matches!(
        reopened.seed_store(),
        Err(StoreError::UniqueConstraintViolation { .. })
    ));
}

#[test]
fn fresh_stores_seed_identically() {
    let (_first_dir, first_path) = empty_db_file();
    let (_second_dir, second_path) = empty_db_file();
    let first = Store::open_at(&first_path).expect("open first");
    let second = Store::open_at(&second_path).expect("open second");

    first.seed_store().expect("seed first");
    second.seed_store().expect("seed second");

    assert_eq!(change_rows(&first), change_rows(&second));
    assert_eq!(item_rows(&first), item_rows(&second));
}

#[test]
fn guarded_seed_is_a_no_op_the_second_time() {
    let (_dir, path) = empty_db_file();
    let store = Store::open_at(&path).expect("open");

    let first = store.seed_store_once().expect("first seed");
    let second = store.seed_store_once().expect("second seed");

    assert_eq!((first.change_rows, first.item_rows), (8, 3));
    assert_eq!((second.change_rows, second.item_rows), (0, 0));
    assert_eq!(store.change().count().expect("count"), 8);
    assert_eq!(store.items().count().expect("count"), 3);
}

#[test]
fn views_see_writes_from_another_connection() {
    let (_dir, path) = empty_db_file();
    let store = Store::open_at(&path).expect("open");
    store.seed_store().expect("seed");
    let items = store.items();
    assert_eq!(items.count().expect("count"), 3);

    let writer = Connection::open(&path).expect("second connection");
    writer
        .execute(
            "UPDATE items SET quantity = ?1 WHERE name = ?2",
            params![12, "Canned Tomatoes"],
        )
        .expect("restock");
    writer
        .execute(
            "INSERT INTO items (name, quantity) VALUES (?1, ?2)",
            params!["Oat Milk", 6],
        )
        .expect("new item");

    assert_eq!(items.count().expect("count"), 4);
    assert_eq!(
        items.find("Canned Tomatoes").expect("query"),
        Some(ItemRow {
            name: "Canned Tomatoes".to_string(),
            quantity: 12,
        })
    );
}

#[test]
fn rows_render_as_key_and_quantity() {
    let (_dir, path) = empty_db_file();
    let store = Store::open_at(&path).expect("open");
    store.seed_store().expect("seed");

    let pound: ChangeRow = store.change().find("£1").expect("query").expect("row");
    let lager = store
        .items()
        .find("Sainsburys Lager")
        .expect("query")
        .expect("row");

    assert_eq!(pound.to_string(), "£1 x100");
    assert_eq!(lager.to_string(), "Sainsburys Lager x5");
    assert_eq!(store.change().name(), "change");
    assert_eq!(store.items().name(), "items");
}
