//! End-to-end tests against a local auctions + profile server

use auctionboard::rendering::TextGrid;
use auctionboard::{BoardConfig, Dashboard, Status};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tiny_http::{Response, Server};

const NOTCH: &str = "069a79f444e94726a5befca90e38aaf5";
const JEB: &str = "853c80ef3c3749fdaa49938b674adae6";

struct TestServer {
    base: String,
    profile_hits: Arc<AtomicUsize>,
}

/// Serves `/auctions` and `/profile/<uuid>`; unknown profiles get a 404.
fn start_test_server() -> TestServer {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let profile_hits = Arc::new(AtomicUsize::new(0));
    let hits = profile_hits.clone();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let path = request.url().to_string();
            let response = if path == "/auctions" {
                Response::from_string(format!(
                    r#"{{"auctions": [
                        {{"item": {{"displayName": "Enchanted Diamond"}}, "price": 125000, "amount": 3, "seller": "{notch}"}},
                        {{"itemName": "Oak Log", "startingBid": 40, "owner": "{jeb}"}},
                        {{"item": "Netherite Ingot", "price": 9001.5, "seller": "{notch_upper}"}},
                        {{"item": "Mystery Box", "price": "ask"}}
                    ]}}"#,
                    notch = NOTCH,
                    jeb = JEB,
                    notch_upper = NOTCH.to_uppercase()
                ))
            } else if let Some(uuid) = path.strip_prefix("/profile/") {
                hits.fetch_add(1, Ordering::SeqCst);
                if uuid == NOTCH {
                    Response::from_string(r#"{"id": "069a79f444e94726a5befca90e38aaf5", "name": "Notch"}"#)
                } else {
                    Response::from_string("Not Found").with_status_code(404)
                }
            } else {
                Response::from_string("Not Found").with_status_code(404)
            };
            let _ = request.respond(response);
        }
    });

    TestServer {
        base: format!("http://{}", addr),
        profile_hits,
    }
}

fn config(server: &TestServer, cache: Option<std::path::PathBuf>) -> BoardConfig {
    BoardConfig {
        auctions_url: format!("{}/auctions", server.base),
        profile_url: format!("{}/profile/{{uuid}}", server.base),
        cache_path: cache,
        columns: 2,
        card_width: 30,
        chunk_size: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_refresh_resolves_names_with_fallback() {
    let server = start_test_server();
    let mut board = Dashboard::new(config(&server, None)).expect("Failed to create dashboard");
    board.refresh().await;

    assert_eq!(board.status(), Status::Loaded);
    let cards = board.visible_cards();
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].title, "Enchanted Diamond");
    assert_eq!(cards[0].amount, 3);
    assert_eq!(cards[0].price, "125,000");
    assert_eq!(cards[0].seller, "Notch");
    assert_eq!(cards[1].seller, "853c80ef-3c37-49fd-aa49-938b674adae6");
    assert_eq!(cards[2].seller, "Notch");
    assert_eq!(cards[3].seller, "Unknown seller");
    assert_eq!(cards[3].price, "ask");

    // Notch appears twice in different notations but is looked up once.
    assert_eq!(server.profile_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_persisted_cache_avoids_lookups() {
    let server = start_test_server();
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("names.json");

    let mut first = Dashboard::new(config(&server, Some(cache.clone()))).unwrap();
    first.refresh().await;
    assert_eq!(server.profile_hits.load(Ordering::SeqCst), 2);
    assert!(cache.exists());

    let mut second = Dashboard::new(config(&server, Some(cache))).unwrap();
    second.refresh().await;
    assert_eq!(server.profile_hits.load(Ordering::SeqCst), 2, "cached names were re-fetched");
    assert_eq!(second.visible_cards()[0].seller, "Notch");
}

#[tokio::test]
async fn test_text_grid_output() {
    let server = start_test_server();
    let mut board = Dashboard::new(config(&server, None)).unwrap();
    board.refresh().await;
    board.set_search("notch");

    let mut grid = TextGrid::new(Vec::new(), board.config().columns, board.config().card_width);
    let emitted = board.render_to(&mut grid).await.unwrap();
    // search covers the entry as served, not resolved names
    assert_eq!(emitted, 0);

    // matches both the lower- and upper-case spellings of the uuid
    board.set_search(NOTCH);
    let emitted = board.render_to(&mut grid).await.unwrap();
    assert_eq!(emitted, 2);

    let text = String::from_utf8(grid.into_inner()).unwrap();
    assert!(text.contains("Enchanted Diamond"));
    assert!(text.contains("Seller: Notch"));
    assert!(!text.contains("Oak Log"));
}

#[tokio::test]
async fn test_unreachable_auctions_sets_generic_status() {
    let cfg = BoardConfig {
        auctions_url: "http://127.0.0.1:1/auctions".to_string(),
        cache_path: None,
        timeout_ms: 2000,
        ..Default::default()
    };
    let mut board = Dashboard::new(cfg).unwrap();
    board.refresh().await;
    assert_eq!(board.status(), Status::Failed);
    assert_eq!(board.status_line(), "Failed to load auctions");
    assert!(board.visible_cards().is_empty());
}

#[test]
fn test_invalid_profile_template_is_rejected() {
    let cfg = BoardConfig {
        profile_url: "https://example.com/profile".to_string(),
        cache_path: None,
        ..Default::default()
    };
    assert!(Dashboard::new(cfg).is_err());
}
