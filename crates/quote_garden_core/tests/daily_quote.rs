use chrono::NaiveDate;
use quote_garden_core::{
    builtin_quotes, daily_index, day_key, DashboardSession, MemoryStore, QuoteService,
};

#[test]
fn new_year_2024_regression() {
    assert_eq!(daily_index("Mon Jan 01 2024", 8), Ok(6));

    let store = MemoryStore::new();
    let quote = QuoteService::new(&store)
        .daily_quote_for("Mon Jan 01 2024")
        .unwrap();
    assert_eq!(quote.author, "Walt Whitman");
}

#[test]
fn dashboard_and_service_agree_on_the_day() {
    let store = MemoryStore::new();
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let key = day_key(date);
    assert_eq!(key, "Sun Oct 18 2026");

    let session = DashboardSession::open_on(&store, key.clone());
    let from_session = session.daily_quote(&store).unwrap();
    let from_service = QuoteService::new(&store).daily_quote_for(&key).unwrap();

    assert_eq!(from_session, from_service);
    assert_eq!(from_session, builtin_quotes()[1]);
}

#[test]
fn todays_quote_comes_from_the_merged_list() {
    let store = MemoryStore::new();
    let service = QuoteService::new(&store);
    service.plant_quote("mine", "me").unwrap();

    let quote = service.daily_quote().unwrap();
    assert!(service.all_quotes().contains(&quote));
}
