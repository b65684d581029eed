use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode as HttpStatus,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::domain::{CharacterId, PageInfo, Place};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct CatalogServerState {
    base: String,
    pages: Arc<Vec<Vec<(i64, &'static str)>>>,
    requested_pages: Arc<Mutex<Vec<u32>>>,
    failing_page: Option<u32>,
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

fn character(base: &str, id: i64, name: &str) -> Character {
    Character {
        id: CharacterId(id),
        name: name.to_string(),
        species: "Human".to_string(),
        status: "Alive".to_string(),
        gender: "Male".to_string(),
        image: format!("{base}/api/character/avatar/{id}.jpeg"),
        origin: Place {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        location: None,
        url: format!("{base}/api/character/{id}"),
        episode: Vec::new(),
    }
}

async fn listing(
    State(state): State<CatalogServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CatalogPage>, HttpStatus> {
    let page = query.page.unwrap_or(1);
    state.requested_pages.lock().await.push(page);

    if state.failing_page == Some(page) {
        return Err(HttpStatus::INTERNAL_SERVER_ERROR);
    }

    let index = (page as usize).checked_sub(1).ok_or(HttpStatus::BAD_REQUEST)?;
    let Some(entries) = state.pages.get(index) else {
        return Err(HttpStatus::NOT_FOUND);
    };
    let results = entries
        .iter()
        .map(|(id, name)| character(&state.base, *id, name))
        .collect();

    Ok(Json(CatalogPage {
        info: PageInfo {
            count: state.pages.iter().map(Vec::len).sum::<usize>() as u32,
            pages: state.pages.len() as u32,
            next: None,
            prev: None,
        },
        results,
    }))
}

async fn detail(
    State(state): State<CatalogServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Character>, HttpStatus> {
    state
        .pages
        .iter()
        .flatten()
        .find(|(candidate, _)| *candidate == id)
        .map(|(id, name)| Json(character(&state.base, *id, name)))
        .ok_or(HttpStatus::NOT_FOUND)
}

async fn avatar(Path(file): Path<String>) -> Result<Vec<u8>, HttpStatus> {
    if file.ends_with(".jpeg") {
        Ok(format!("avatar:{file}").into_bytes())
    } else {
        Err(HttpStatus::NOT_FOUND)
    }
}

async fn spawn_catalog_server(
    pages: Vec<Vec<(i64, &'static str)>>,
    failing_page: Option<u32>,
) -> anyhow::Result<(String, CatalogServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base = format!("http://{addr}");
    let state = CatalogServerState {
        base: base.clone(),
        pages: Arc::new(pages),
        requested_pages: Arc::new(Mutex::new(Vec::new())),
        failing_page,
    };
    let app = Router::new()
        .route("/api/character", get(listing))
        .route("/api/character/:id", get(detail))
        .route("/api/character/avatar/:file", get(avatar))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("{base}/api/character"), state))
}

fn http_catalog(url: &str) -> HttpCatalog {
    HttpCatalog::new(url, Duration::from_secs(5)).expect("http catalog")
}

#[test]
fn first_page_uses_bare_listing_url() {
    let catalog = http_catalog("https://rickandmortyapi.com/api/character");

    assert_eq!(
        catalog.page_url(1).as_str(),
        "https://rickandmortyapi.com/api/character"
    );
    assert_eq!(
        catalog.page_url(3).as_str(),
        "https://rickandmortyapi.com/api/character?page=3"
    );
}

#[test]
fn rejects_unparseable_catalog_url() {
    let err = HttpCatalog::new("not a url", Duration::from_secs(1)).expect_err("invalid url");
    assert!(matches!(err, CatalogError::InvalidUrl { .. }));
    assert_eq!(err.code(), ErrorCode::NetworkFailure);
}

#[tokio::test]
async fn loads_every_page_sequentially_in_page_order() {
    let (url, state) = spawn_catalog_server(
        vec![
            vec![(1, "Rick Sanchez"), (2, "Morty Smith")],
            vec![(3, "Summer Smith")],
            vec![(4, "Beth Smith"), (5, "Jerry Smith"), (6, "Abadango Cluster Princess")],
        ],
        None,
    )
    .await
    .expect("spawn server");

    let characters = load_all_characters(&http_catalog(&url))
        .await
        .expect("load catalog");

    assert_eq!(*state.requested_pages.lock().await, vec![1, 2, 3]);
    let ids: Vec<i64> = characters.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn single_page_catalog_issues_one_request() {
    let (url, state) = spawn_catalog_server(vec![vec![(1, "Rick Sanchez")]], None)
        .await
        .expect("spawn server");

    let characters = load_all_characters(&http_catalog(&url))
        .await
        .expect("load catalog");

    assert_eq!(characters.len(), 1);
    assert_eq!(*state.requested_pages.lock().await, vec![1]);
}

#[tokio::test]
async fn failed_page_abandons_the_whole_load() {
    let (url, state) = spawn_catalog_server(
        vec![
            vec![(1, "Rick Sanchez")],
            vec![(2, "Morty Smith")],
            vec![(3, "Summer Smith")],
        ],
        Some(2),
    )
    .await
    .expect("spawn server");

    let err = load_all_characters(&http_catalog(&url))
        .await
        .expect_err("page 2 fails");

    assert!(matches!(
        err,
        CatalogError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert_eq!(*state.requested_pages.lock().await, vec![1, 2]);
}

#[tokio::test]
async fn loads_single_character_from_lookup_uri() {
    let (url, _state) = spawn_catalog_server(
        vec![vec![(1, "Rick Sanchez"), (2, "Morty Smith")]],
        None,
    )
    .await
    .expect("spawn server");

    let character = load_character(&http_catalog(&url), &format!("{url}/2"))
        .await
        .expect("load character");

    assert_eq!(character.id, CharacterId(2));
    assert_eq!(character.name, "Morty Smith");
}

#[tokio::test]
async fn missing_character_reports_status() {
    let (url, _state) = spawn_catalog_server(vec![vec![(1, "Rick Sanchez")]], None)
        .await
        .expect("spawn server");

    let err = load_character(&http_catalog(&url), &format!("{url}/99"))
        .await
        .expect_err("unknown id");

    assert!(matches!(
        err,
        CatalogError::Status { status, .. } if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn unreachable_catalog_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = load_all_characters(&http_catalog(&format!("http://{addr}/api/character")))
        .await
        .expect_err("nothing listening");

    assert!(matches!(err, CatalogError::Transport { .. }));
}

#[tokio::test]
async fn fetches_portrait_bytes_referenced_by_a_record() {
    let (url, _state) = spawn_catalog_server(vec![vec![(1, "Rick Sanchez")]], None)
        .await
        .expect("spawn server");
    let catalog = http_catalog(&url);
    let rick = load_character(&catalog, &format!("{url}/1"))
        .await
        .expect("load character");

    let bytes = catalog.fetch_asset(&rick.image).await.expect("portrait");

    assert_eq!(bytes, b"avatar:1.jpeg".to_vec());
}
