use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Nested {
    count: u32,
    ratio: f64,
    tags: Vec<String>,
    child: Option<Box<Nested>>,
}

fn sample() -> Nested {
    Nested {
        count: 3,
        ratio: 0.25,
        tags: vec!["a".to_owned(), "b".to_owned()],
        child: Some(Box::new(Nested {
            count: 0,
            ratio: -1.5,
            tags: vec![],
            child: None,
        })),
    }
}

// =============================================================
// Plain text round-trips
// =============================================================

#[test]
fn set_then_get_returns_value() {
    let store = MemoryStore::default();
    store.set(keys::ROLE, "TEACHER");
    assert_eq!(store.get(keys::ROLE).as_deref(), Some("TEACHER"));
}

#[test]
fn get_missing_key_is_none() {
    let store = MemoryStore::default();
    assert_eq!(store.get(keys::ACCESS_TOKEN), None);
}

#[test]
fn remove_deletes_single_key() {
    let store = MemoryStore::default();
    store.set(keys::ROLE, "ADMIN");
    store.set(keys::ACCESS_TOKEN, "tok");
    store.remove(keys::ROLE);
    assert_eq!(store.get(keys::ROLE), None);
    assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("tok"));
}

#[test]
fn clear_wipes_everything() {
    let store = MemoryStore::default();
    store.set(keys::ACCESS_TOKEN, "tok");
    store.set(keys::THEME, "dark");
    store.clear();
    assert_eq!(store.get(keys::ACCESS_TOKEN), None);
    assert_eq!(store.get(keys::THEME), None);
}

#[test]
fn clear_session_preserves_theme() {
    let store = MemoryStore::default();
    store.set(keys::ACCESS_TOKEN, "tok");
    store.set(keys::REFRESH_TOKEN, "ref");
    store.set(keys::ROLE, "STUDENT");
    store.set(keys::PROFILE, "{}");
    store.set(keys::THEME, "dark");

    clear_session(&store);

    assert_eq!(store.get(keys::ACCESS_TOKEN), None);
    assert_eq!(store.get(keys::REFRESH_TOKEN), None);
    assert_eq!(store.get(keys::ROLE), None);
    assert_eq!(store.get(keys::PROFILE), None);
    assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
}

// =============================================================
// JSON round-trips and the self-healing read
// =============================================================

#[test]
fn structured_values_round_trip_losslessly() {
    let store = MemoryStore::default();
    set_json(&store, keys::PROFILE, &sample());
    let back: Nested = get_json(&store, keys::PROFILE).expect("round-trips");
    assert_eq!(back, sample());
}

#[test]
fn corrupt_entry_returns_none_and_is_evicted() {
    let store = MemoryStore::default();
    store.set(keys::PROFILE, "{definitely not json");

    let first: Option<Nested> = get_json(&store, keys::PROFILE);
    assert_eq!(first, None);
    // The corrupt entry is gone, so the read self-healed.
    assert_eq!(store.get(keys::PROFILE), None);

    // Idempotent: a second read is also None, without error.
    let second: Option<Nested> = get_json(&store, keys::PROFILE);
    assert_eq!(second, None);
}

#[test]
fn wrong_shape_is_treated_as_corrupt() {
    let store = MemoryStore::default();
    store.set(keys::PROFILE, r#"{"unexpected":"shape"}"#);

    let parsed: Option<Nested> = get_json(&store, keys::PROFILE);
    assert_eq!(parsed, None);
    assert_eq!(store.get(keys::PROFILE), None);
}

#[test]
fn set_json_stores_plain_text() {
    let store = MemoryStore::default();
    set_json(&store, keys::PROFILE, &vec![1, 2, 3]);
    assert_eq!(store.get(keys::PROFILE).as_deref(), Some("[1,2,3]"));
}
