mod common;

use std::sync::Arc;
use std::time::Duration;

use billbook_client::{InvoiceForm, SearchController};
use billbook_parties::{CustomerRef, SearchKey, SearchState};
use chrono::NaiveDate;

use common::{customer, FakeCustomers};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn customers() -> Arc<FakeCustomers> {
    Arc::new(FakeCustomers::with(vec![
        customer(1, "Alan Smith"),
        customer(2, "Alex Morgan"),
        customer(3, "Alexa Ray"),
        customer(4, "Bianca Silva"),
    ]))
}

fn controller(api: &Arc<FakeCustomers>) -> SearchController {
    SearchController::with_settings(api.clone(), DEBOUNCE, 2)
}

fn names(controller: &SearchController) -> Vec<String> {
    controller
        .snapshot()
        .visible_suggestions()
        .iter()
        .map(|c| c.name.clone())
        .collect()
}

async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_sends_one_search() {
    let api = customers();
    let search = controller(&api);

    for text in ["A", "Al", "Ale", "Alex"] {
        search.input(text);
        wait(50).await;
    }
    assert_eq!(search.snapshot().state(), SearchState::Debouncing);
    assert!(api.calls().is_empty());

    wait(400).await;
    assert_eq!(api.calls(), vec!["Alex".to_string()]);
    assert_eq!(names(&search), vec!["Alex Morgan", "Alexa Ray"]);
    assert_eq!(search.snapshot().state(), SearchState::ShowingSuggestions);
}

#[tokio::test(start_paused = true)]
async fn stale_response_never_replaces_newer_results() {
    let api = customers();
    api.delay("Al", Duration::from_millis(1000));
    let search = controller(&api);

    search.input("Al");
    wait(350).await;
    assert!(search.snapshot().is_loading());

    search.input("Alex");
    wait(350).await;
    assert_eq!(names(&search), vec!["Alex Morgan", "Alexa Ray"]);

    // "Al" answers long after "Alex" did.
    wait(1000).await;
    assert_eq!(api.calls(), vec!["Al".to_string(), "Alex".to_string()]);
    assert_eq!(names(&search), vec!["Alex Morgan", "Alexa Ray"]);
    assert!(!search.snapshot().is_loading());
}

#[tokio::test(start_paused = true)]
async fn short_query_closes_without_searching() {
    let api = customers();
    let search = controller(&api);

    search.input("A");
    wait(400).await;

    assert!(api.calls().is_empty());
    assert_eq!(search.snapshot().state(), SearchState::Closed);
    assert!(names(&search).is_empty());
}

#[tokio::test(start_paused = true)]
async fn backspacing_below_minimum_ignores_the_slow_longer_search() {
    let api = customers();
    api.delay("Al", Duration::from_millis(1000));
    let search = controller(&api);

    search.input("Al");
    wait(350).await;
    assert!(search.snapshot().is_loading());

    search.input("A");
    wait(400).await;
    assert!(!search.snapshot().is_loading());
    assert_eq!(search.snapshot().state(), SearchState::Closed);

    // "Al" answers after the text was shortened.
    wait(1000).await;
    let snapshot = search.snapshot();
    assert_eq!(api.calls(), vec!["Al".to_string()]);
    assert_eq!(snapshot.state(), SearchState::Closed);
    assert_eq!(snapshot.query(), "A");
    assert!(snapshot.visible_suggestions().is_empty());
    assert!(!snapshot.is_open());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_input_cancels_the_pending_search() {
    let api = customers();
    let search = controller(&api);

    search.input("Al");
    wait(100).await;
    search.input("");
    wait(400).await;

    assert!(api.calls().is_empty());
    assert_eq!(search.snapshot().state(), SearchState::Closed);
}

#[tokio::test(start_paused = true)]
async fn failure_shows_error_and_closes() {
    let api = customers();
    api.fail();
    let search = controller(&api);

    search.input("Al");
    wait(400).await;

    let snapshot = search.snapshot();
    assert_eq!(snapshot.state(), SearchState::Closed);
    assert!(snapshot.suggestions().is_empty());
    assert_eq!(snapshot.error(), Some("network error: connection refused"));
}

#[tokio::test(start_paused = true)]
async fn selection_discards_a_late_response() {
    let api = customers();
    api.delay("Ali", Duration::from_millis(500));
    let search = controller(&api);

    search.input("Al");
    wait(400).await;
    assert_eq!(names(&search).len(), 3);

    search.input("Ali");
    wait(350).await;
    assert!(search.snapshot().is_loading());

    let picked = search.select(1).unwrap();
    assert_eq!(picked.name, "Alex Morgan");

    wait(600).await;
    let snapshot = search.snapshot();
    assert_eq!(snapshot.state(), SearchState::Closed);
    assert_eq!(snapshot.query(), "Alex Morgan");
    assert!(snapshot.suggestions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn escape_then_focus_reopens_without_searching() {
    let api = customers();
    let search = controller(&api);

    search.input("Bi");
    wait(400).await;
    assert_eq!(api.calls().len(), 1);

    search.key(SearchKey::Escape);
    assert!(!search.snapshot().is_open());

    assert!(search.focus());
    assert_eq!(names(&search), vec!["Bianca Silva"]);
    assert_eq!(api.calls().len(), 1);

    search.pointer_outside();
    assert!(!search.snapshot().is_open());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_results() {
    let api = customers();
    let search = controller(&api);
    let mut updates = search.subscribe();

    search.input("Bi");
    wait(400).await;

    assert!(updates.has_changed().unwrap());
    let latest = updates.borrow_and_update().clone();
    assert_eq!(latest.state(), SearchState::ShowingSuggestions);
    assert_eq!(latest.suggestions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn form_binds_on_enter_and_unbinds_on_divergent_typing() {
    let api = customers();
    let mut form = InvoiceForm::new(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), controller(&api));

    form.customer_input("Bia");
    wait(400).await;
    assert!(form.customer_key(SearchKey::Enter));
    assert_eq!(form.draft().customer().text(), "Bianca Silva");
    assert!(matches!(
        form.draft().customer().resolve(),
        Ok(CustomerRef::Existing { .. })
    ));

    form.customer_input("Bianca S.");
    assert_eq!(
        form.draft().customer().resolve().unwrap(),
        CustomerRef::Draft {
            name: "Bianca S.".into()
        }
    );
}
