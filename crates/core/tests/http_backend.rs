//! Drives the real HTTP transport against an in-process stub backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use hotelcmp::protocol::{BookmarkId, Source};
use hotelcmp::{ClientConfig, Credential, CredentialStorage, Error, FileCredentialStorage, HotelClient, SearchCriteria, SearchOutcome, SessionStatus, best_deal};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;

const GOOD_TOKEN: &str = "good-token";

#[derive(Default)]
struct Backend {
	bookmarks: Vec<Value>,
	next_id: u64,
}

type Shared = Arc<Mutex<Backend>>;

fn unauthorized() -> Response {
	(StatusCode::UNAUTHORIZED, Json(json!({"detail": "Could not validate credentials"}))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> Response {
	if body["password"] == "secret" {
		Json(json!({"access_token": GOOD_TOKEN, "refresh_token": "refresh", "token_type": "bearer"})).into_response()
	} else {
		(StatusCode::UNAUTHORIZED, Json(json!({"detail": "Incorrect email or password"}))).into_response()
	}
}

async fn verify(headers: HeaderMap) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	Json(json!({"email": "traveller@example.com", "username": "traveller"})).into_response()
}

async fn search(headers: HeaderMap, Json(body): Json<Value>) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	if body["min_price"].as_u64() > body["max_price"].as_u64() {
		return (StatusCode::BAD_REQUEST, Json(json!({"detail": "Invalid price range"}))).into_response();
	}
	Json(json!({"result": [{
		"hotel_name": format!("Hotel {}", body["city"].as_str().unwrap_or_default()),
		"sources": [
			{"source": "agoda", "price": 3000, "rating": 4, "image": "//pix.agoda.net/a.jpg", "booking_url": "https://agoda.com/a"},
			{"source": "booking.com", "price": 2800, "rating": 4, "image": "https://cf.bstatic.com/b.jpg", "booking_url": "https://booking.com/b"}
		]
	}]}))
	.into_response()
}

async fn list_bookmarks(State(state): State<Shared>, headers: HeaderMap) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	Json(Value::Array(state.lock().bookmarks.clone())).into_response()
}

async fn create_bookmark(State(state): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	let mut backend = state.lock();
	backend.next_id += 1;
	body["id"] = json!(backend.next_id);
	body["user_id"] = json!(1);
	body["created_at"] = json!("2024-05-01T10:00:00");
	backend.bookmarks.push(body.clone());
	Json(body).into_response()
}

async fn delete_bookmark(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	let mut backend = state.lock();
	let before = backend.bookmarks.len();
	backend.bookmarks.retain(|b| b["id"].as_u64() != Some(id));
	if backend.bookmarks.len() == before {
		return (StatusCode::NOT_FOUND, Json(json!({"detail": "Bookmark not found"}))).into_response();
	}
	Json(json!({"message": "Bookmark deleted successfully"})).into_response()
}

async fn spawn_backend() -> Result<SocketAddr> {
	let app = Router::new()
		.route("/login", post(login))
		.route("/verify-token", get(verify))
		.route("/search", post(search))
		.route("/bookmarks", get(list_bookmarks).post(create_bookmark))
		.route("/bookmarks/{id}", delete(delete_bookmark))
		.with_state(Shared::default());

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
	let addr = listener.local_addr()?;
	tokio::spawn(async move {
		let _ = axum::serve(listener, app).await;
	});
	Ok(addr)
}

fn config(addr: SocketAddr, dir: &TempDir) -> Result<ClientConfig> {
	Ok(ClientConfig::new(Url::parse(&format!("http://{addr}"))?)
		.with_timeout(Duration::from_secs(10))
		.with_credentials_path(dir.path().join("credentials.json")))
}

#[tokio::test]
async fn full_session_over_http() -> Result<()> {
	let addr = spawn_backend().await?;
	let dir = TempDir::new()?;
	let config = config(addr, &dir)?;

	let client = HotelClient::new(&config)?;
	assert_eq!(client.init().await, SessionStatus::Anonymous);

	let rejected = client.auth().login("traveller@example.com", "wrong").await.unwrap_err();
	assert_eq!(
		rejected,
		Error::RequestFailed {
			status: 401,
			message: "Incorrect email or password".into()
		}
	);

	client.auth().login("traveller@example.com", "secret").await?;
	assert!(config.credentials_path.exists());

	let outcome = client
		.search()
		.search(&SearchCriteria::new("Dhaka", 1000, 5000).with_star_rating(4))
		.await?;
	let SearchOutcome::Applied(hotels) = outcome else {
		anyhow::bail!("search unexpectedly superseded");
	};
	assert_eq!(hotels[0].hotel_name, "Hotel Dhaka");
	assert_eq!(best_deal(&hotels[0])?.source, Source::BookingCom);

	let created = client.bookmarks().add(&hotels[0]).await?;
	assert_eq!(created.price, 2800.0);
	let listed = client.bookmarks().load().await?;
	assert_eq!(listed.len(), 1);
	assert_eq!(listed[0].id, created.id);

	client.bookmarks().remove(&created.id).await?;
	client.bookmarks().remove(&created.id).await?;
	assert!(client.bookmarks().is_empty());
	assert!(client.bookmarks().load().await?.is_empty());

	// A fresh process restores and verifies the stored credential.
	let restarted = HotelClient::new(&config)?;
	assert_eq!(restarted.init().await, SessionStatus::Authenticated);
	assert_eq!(restarted.session().identity().and_then(|i| i.username).as_deref(), Some("traveller"));
	Ok(())
}

#[tokio::test]
async fn stale_stored_credential_is_erased_on_start() -> Result<()> {
	let addr = spawn_backend().await?;
	let dir = TempDir::new()?;
	let config = config(addr, &dir)?;
	FileCredentialStorage::new(&config.credentials_path).save(&Credential::new("expired", "refresh"))?;

	let client = HotelClient::new(&config)?;

	assert_eq!(client.init().await, SessionStatus::Anonymous);
	assert!(!config.credentials_path.exists());
	Ok(())
}

#[tokio::test]
async fn unknown_bookmark_delete_is_success() -> Result<()> {
	let addr = spawn_backend().await?;
	let dir = TempDir::new()?;
	let client = HotelClient::new(&config(addr, &dir)?)?;
	client.auth().login("traveller@example.com", "secret").await?;

	client.bookmarks().remove(&BookmarkId::from(404)).await?;
	Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> Result<()> {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
	let addr = listener.local_addr()?;
	drop(listener);
	let dir = TempDir::new()?;
	let client = HotelClient::new(&config(addr, &dir)?)?;

	let err = client.auth().login("traveller@example.com", "secret").await.unwrap_err();

	assert!(err.is_network(), "unexpected error: {err:?}");
	Ok(())
}
