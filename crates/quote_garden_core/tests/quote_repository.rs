use quote_garden_core::repo::quote_repo::QuoteRepository;
use quote_garden_core::{builtin_quotes, MemoryStore, PersistentStore, Quote, SqliteStore};

fn assert_builtin_prefix(all: &[Quote]) {
    let builtins = builtin_quotes();
    assert_eq!(&all[..builtins.len()], builtins.as_slice());
}

#[test]
fn empty_user_set_returns_exactly_the_builtins() {
    let store = MemoryStore::new();
    let repo = QuoteRepository::new(&store);

    assert_eq!(repo.get_all(), builtin_quotes());
    assert_eq!(repo.get_all().len(), 8);
    assert!(repo.get_user_quotes().is_empty());
}

#[test]
fn append_to_empty_set_is_read_back() {
    let store = MemoryStore::new();
    let repo = QuoteRepository::new(&store);

    repo.append("Test", "A").unwrap();
    assert_eq!(repo.get_user_quotes(), vec![Quote::new("Test", "A")]);
}

#[test]
fn append_grows_user_set_by_one_and_keeps_builtin_prefix() {
    let store = SqliteStore::open_in_memory().unwrap();
    let repo = QuoteRepository::new(&store);

    for (i, (text, author)) in [("one", "x"), ("two", ""), ("one", "x")].iter().enumerate() {
        let before = repo.get_user_quotes().len();
        let count = repo.append(text, author).unwrap();
        let user = repo.get_user_quotes();

        assert_eq!(count, before + 1);
        assert_eq!(user.len(), i + 1);
        assert_eq!(user.last(), Some(&Quote::new(*text, *author)));

        let all = repo.get_all();
        assert_eq!(all.len(), builtin_quotes().len() + user.len());
        assert_builtin_prefix(&all);
    }

    // Duplicates are stored, not merged.
    assert_eq!(repo.get_user_quotes()[0], repo.get_user_quotes()[2]);
}

#[test]
fn empty_text_is_accepted() {
    let store = MemoryStore::new();
    let repo = QuoteRepository::new(&store);

    repo.append("", "").unwrap();
    assert_eq!(repo.get_user_quotes(), vec![Quote::new("", "")]);
}

#[test]
fn user_quotes_are_persisted_as_a_plain_json_array() {
    let store = MemoryStore::new();
    QuoteRepository::new(&store).append("Test", "A").unwrap();

    let raw = store.get_one("userQuotes").unwrap().unwrap();
    assert_eq!(raw, serde_json::json!([{ "text": "Test", "author": "A" }]));
}
