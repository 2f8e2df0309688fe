use radar_core::*;
use serde_json::json;
use std::sync::Arc;

/// End-to-end flow over the export payload: parse, load, resolve, directory,
/// and both filter modes.
#[test]
fn test_full_pipeline() {
    let payload = json!({
        "status": "success",
        "wxid": "me",
        "feeds": [
            {
                "id": "f1",
                "timestamp": 1700000300,
                "author": "wx_alice",
                "content": {"text": "sunset", "media": [{"type": "image", "src": "http://img"}]},
                "stats": {"likes_count": 1, "comments_count": 1},
                "interactions": {
                    "likes": [{"user": "wx_bob", "name": "Bob", "time": 1700000400}],
                    "comments": [{"user": "wx_carol", "name": "Carol", "content": "pretty",
                                  "time": 1700000500, "reply_to": "wx_alice"}]
                }
            },
            {
                "id": "f2",
                "timestamp": 1700000200,
                "author": "wx_alice",
                "content": {"text": "coffee", "media": []},
                "interactions": {"likes": [], "comments": []}
            },
            {
                "id": "f3",
                "timestamp": 1700000100,
                "author": "wx_bob",
                "interactions": {
                    "likes": [{"user": "wx_bob", "name": "Bob"}],
                    "comments": []
                }
            }
        ]
    })
    .to_string();

    let records = parse_export(&payload).unwrap();

    let mut book = StaticAddressBook::new();
    book.insert("wx_alice", "Alice (neighbor)");

    let store = RadarStore::new(Arc::new(book));
    store.load(&records);
    assert_eq!(store.len(), 3);

    // Name resolution: override > harvested snapshot > raw handle.
    assert_eq!(store.resolve("wx_alice"), "Alice (neighbor)");
    assert_eq!(store.resolve("wx_bob"), "Bob");
    assert_eq!(store.resolve("wx_carol"), "Carol");
    assert_eq!(store.resolve("wx_nobody"), "wx_nobody");

    // Directory: authors only, ordered by count then handle, dated by timestamp.
    let contacts = store.contacts();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].handle, "wx_alice");
    assert_eq!(contacts[0].name, "Alice (neighbor)");
    assert_eq!(contacts[0].moment_count, 2);
    assert_eq!(contacts[0].latest_timestamp, 1700000300);
    assert_eq!(contacts[1].handle, "wx_bob");
    assert_eq!(contacts[1].moment_count, 1);
    // wx_carol only commented; the directory never surfaces her.
    assert!(!contacts.iter().any(|c| c.handle == "wx_carol"));

    // Single-author mode.
    store.select_author(Some("wx_alice".to_string()));
    let view = store.filtered_moments();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].id, "f1");
    assert_eq!(view[1].id, "f2");

    // Radar mode: f1 matches for carol (commenter); f3 does not match for
    // bob-as-author because its only engagement is bob's own like.
    store.clear_selection();
    store.set_radar_target(Some("wx_carol".to_string()));
    let view = store.filtered_moments();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "f1");

    store.set_radar_target(Some("wx_bob".to_string()));
    let ids: Vec<_> = store.filtered_moments().into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["f1"]);
}

/// The mutual-visibility scenario: one moment by "U1", liked by "U2" whose
/// snapshot name is "Bob", no override for "U2". Both the liker's radar and
/// the author's radar must surface the moment.
#[test]
fn mutual_visibility_scenario() {
    let batch = vec![json!({
        "id": "m1",
        "timestamp": 1700000000,
        "author": "U1",
        "interactions": {
            "likes": [{"user": "U2", "name": "Bob"}],
            "comments": []
        }
    })];

    let store = RadarStore::new(Arc::new(EmptyAddressBook));
    store.load(&batch);

    let contacts = store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].handle, "U1");
    assert_eq!(contacts[0].name, store.resolve("U1"));
    assert_eq!(contacts[0].moment_count, 1);

    assert_eq!(store.resolve("U2"), "Bob");

    // U2 actively participated (rule a).
    store.set_radar_target(Some("U2".to_string()));
    let view = store.filtered_moments();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "m1");

    // U1 passively received outside engagement (rule b).
    store.set_radar_target(Some("U1".to_string()));
    let view = store.filtered_moments();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "m1");
}

/// Reloading replaces the batch and the identity index wholesale.
#[test]
fn reload_discards_previous_index() {
    let store = RadarStore::new(Arc::new(EmptyAddressBook));

    store.load(&[json!({
        "id": "a", "author": "u1",
        "interactions": {"likes": [{"user": "u2", "name": "Bob"}], "comments": []}
    })]);
    assert_eq!(store.resolve("u2"), "Bob");

    store.load(&[json!({"id": "b", "author": "u1"})]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.resolve("u2"), "u2");
}

/// A sqlite-backed address book plugs into the same resolution chain.
#[test]
fn sqlite_address_book_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("contacts.db");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE Contact (UserName TEXT, Remark TEXT, NickName TEXT);
             INSERT INTO Contact VALUES ('wx_bob', 'Bob from gym', 'bobby');",
        )
        .unwrap();
    }

    let book = SqliteAddressBook::open(&db_path).unwrap();
    let store = RadarStore::new(Arc::new(book));
    store.load(&[json!({
        "id": "f1", "timestamp": 1700000000, "author": "wx_bob",
        "interactions": {"likes": [{"user": "wx_bob", "name": "SnapshotBob"}], "comments": []}
    })]);

    // Remark outranks the feed-harvested snapshot name.
    assert_eq!(store.resolve("wx_bob"), "Bob from gym");
    assert_eq!(store.contacts()[0].name, "Bob from gym");
}
