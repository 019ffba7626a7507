use super::*;
use crate::testing::{summary, ScriptedProvider};

fn batman_results() -> Vec<MovieSummary> {
    vec![
        summary("tt0372784", "Batman Begins", "2005"),
        summary("tt2975590", "Batman v Superman: Dawn of Justice", "2016"),
    ]
}

fn controller(provider: &Arc<ScriptedProvider>) -> SearchController {
    SearchController::new(Arc::clone(provider) as Arc<dyn MovieProvider>, 3)
}

#[tokio::test]
async fn test_short_query_never_reaches_provider() {
    let provider = Arc::new(ScriptedProvider::new());
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();
    selection.select("tt1");

    for query in ["b", "ba", "", "é"] {
        assert_eq!(search.set_query(query, &mut selection), QueryOutcome::TooShort);
        assert!(search.results().is_empty());
        assert_eq!(search.error(), None);
        assert!(!search.is_loading());
    }

    assert!(!search.settle().await);
    assert!(provider.search_calls().is_empty());
    // Short queries leave the selection alone
    assert_eq!(selection.current(), Some("tt1"));
}

#[tokio::test]
async fn test_successful_search_keeps_provider_order() {
    let provider = Arc::new(ScriptedProvider::new().with_search("batman", Ok(batman_results())));
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    assert_eq!(search.set_query("batman", &mut selection), QueryOutcome::Fetching);
    assert!(search.is_loading());

    assert!(search.settle().await);
    assert_eq!(search.results(), &batman_results()[..]);
    assert_eq!(search.error(), None);
    assert!(!search.is_loading());
    assert_eq!(provider.search_calls(), vec!["batman"]);
}

#[tokio::test]
async fn test_fetch_closes_selection() {
    let provider = Arc::new(ScriptedProvider::new().with_search("batman", Ok(batman_results())));
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();
    selection.select("tt0468569");

    search.set_query("batman", &mut selection);
    assert_eq!(selection.current(), None);
}

#[tokio::test]
async fn test_rejected_search_surfaces_provider_message() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_search("batman", Ok(batman_results()))
            .with_search("zzzzzz", Err(ProviderError::Rejected("Movie not found!".to_string()))),
    );
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    search.set_query("batman", &mut selection);
    search.settle().await;
    search.set_query("zzzzzz", &mut selection);
    search.settle().await;

    assert_eq!(search.error(), Some("Movie not found!"));
    assert!(search.results().is_empty());
    assert!(!search.is_loading());
}

#[tokio::test]
async fn test_transport_failure_includes_status() {
    let provider = Arc::new(
        ScriptedProvider::new().with_search("batman", Err(ProviderError::transport(Some(401), "Unauthorized"))),
    );
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    search.set_query("batman", &mut selection);
    search.settle().await;

    assert_eq!(search.error(), Some("Can't fetch data (401)"));
    assert!(!search.is_loading());
}

#[tokio::test]
async fn test_new_query_clears_previous_error() {
    let provider = Arc::new(ScriptedProvider::new().with_search("batman", Ok(batman_results())).gated("batman"));
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    search.set_query("xyzzy", &mut selection);
    search.settle().await;
    assert!(search.error().is_some());

    search.set_query("batman", &mut selection);
    assert_eq!(search.error(), None);
    assert!(search.is_loading());

    provider.release("batman");
    search.settle().await;
    assert_eq!(search.results().len(), 2);
}

#[tokio::test]
async fn test_superseded_search_is_a_no_op() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_search("bat", Ok(vec![summary("tt0096895", "Batman", "1989")]))
            .with_search("batman", Ok(batman_results()))
            .gated("bat")
            .gated("batman"),
    );
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    search.set_query("bat", &mut selection);
    // Let the first request reach the provider before it is superseded
    tokio::task::yield_now().await;
    search.set_query("batman", &mut selection);
    tokio::task::yield_now().await;

    // The stale request finishing must not touch state
    provider.release("bat");
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(search.is_loading());
    assert!(search.results().is_empty());
    assert_eq!(search.error(), None);

    provider.release("batman");
    assert!(search.settle().await);
    assert_eq!(search.results(), &batman_results()[..]);
    assert!(!search.is_pending());
    assert!(!search.settle().await);
}

#[tokio::test]
async fn test_short_query_cancels_pending_search() {
    let provider = Arc::new(ScriptedProvider::new().with_search("batman", Ok(batman_results())).gated("batman"));
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    search.set_query("batman", &mut selection);
    search.set_query("ba", &mut selection);
    provider.release("batman");

    assert!(!search.is_loading());
    assert!(!search.settle().await);
    assert!(search.results().is_empty());
}

#[tokio::test]
async fn test_same_query_is_unchanged() {
    let provider = Arc::new(ScriptedProvider::new().with_search("batman", Ok(batman_results())));
    let mut search = controller(&provider);
    let mut selection = SelectionController::new();

    search.set_query("batman", &mut selection);
    search.settle().await;
    selection.select("tt0372784");

    assert_eq!(search.set_query("batman", &mut selection), QueryOutcome::Unchanged);
    assert_eq!(selection.current(), Some("tt0372784"));
    assert_eq!(provider.search_calls().len(), 1);
}
