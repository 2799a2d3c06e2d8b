use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct EntryDto {
    id: String,
    name: String,
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct CollectionDto {
    year: i32,
    entries: Vec<EntryDto>,
    revision: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MonthSummaryDto {
    unique_people: usize,
    total_entries: usize,
    total_days: i64,
    entries: Vec<EntryDto>,
}

#[derive(Debug, Deserialize)]
struct ImportDto {
    added: usize,
    updated: usize,
    skipped: usize,
}

#[derive(Debug, Deserialize)]
struct ExportDto {
    version: u32,
    year: i32,
    entries: Vec<EntryDto>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn unique_data_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "timeoff_http_{}_{}.json",
        std::process::id(),
        unique_suffix()
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/entries")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_timeoff"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn create_entry(
    client: &Client,
    base_url: &str,
    name: &str,
    kind: &str,
    start: &str,
    end: &str,
) -> CollectionDto {
    let response = client
        .post(format!("{base_url}/api/entries"))
        .json(&serde_json::json!({
            "name": name,
            "type": kind,
            "start": start,
            "end": end,
            "note": ""
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn month_for(client: &Client, base_url: &str, month: u32, name: &str) -> MonthSummaryDto {
    client
        .get(format!("{base_url}/api/month/{month}?name={name}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_created_entry_shows_up_in_the_month_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let name = format!("ana-{}", unique_suffix());
    let collection = create_entry(
        &client,
        &server.base_url,
        &name,
        "Vacaciones",
        "2026-03-10",
        "2026-03-15",
    )
    .await;
    assert_eq!(collection.year, 2026);
    assert!(collection.revision.is_some());

    let summary = month_for(&client, &server.base_url, 3, &name).await;
    assert_eq!(summary.total_entries, 1);
    assert_eq!(summary.unique_people, 1);
    assert_eq!(summary.total_days, 6);
    assert_eq!(summary.entries[0].name, name);
    assert_eq!(summary.entries[0].start, "2026-03-10");
    assert_eq!(summary.entries[0].end, "2026-03-15");
}

#[tokio::test]
async fn http_invalid_entry_is_rejected_with_the_first_failing_rule() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({
            "name": "  ",
            "type": "Permiso",
            "start": "2025-03-10",
            "end": "2026-03-15"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), "name required");
}

#[tokio::test]
async fn http_deleting_an_entry_empties_its_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let name = format!("luis-{}", unique_suffix());
    let collection = create_entry(
        &client,
        &server.base_url,
        &name,
        "Permiso",
        "2026-08-03",
        "2026-08-04",
    )
    .await;
    let entry = collection
        .entries
        .iter()
        .find(|e| e.name == name)
        .expect("created entry");

    let response = client
        .delete(format!("{}/api/entries/{}", server.base_url, entry.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let summary = month_for(&client, &server.base_url, 8, &name).await;
    assert_eq!(summary.total_entries, 0);

    let missing = client
        .delete(format!("{}/api/entries/{}", server.base_url, entry.id))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn http_import_counts_and_export_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let name = format!("marta-{}", unique_suffix());
    let id = format!("imp-{}", unique_suffix());
    let response = client
        .post(format!("{}/api/import", server.base_url))
        .json(&serde_json::json!({
            "version": 1,
            "year": 2026,
            "entries": [
                {
                    "id": id,
                    "name": name,
                    "type": "Incapacidad",
                    "start": "2026-09-07",
                    "end": "2026-09-09"
                },
                {
                    "name": "fuera de año",
                    "type": "Otro",
                    "start": "2025-12-31",
                    "end": "2025-12-31"
                }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let outcome: ImportDto = response.json().await.unwrap();
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.updated, 0);
    assert_eq!(outcome.skipped, 1);

    let export: ExportDto = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(export.version, 1);
    assert_eq!(export.year, 2026);
    let exported = export
        .entries
        .iter()
        .find(|e| e.id == id)
        .expect("imported entry is exported");
    assert_eq!(exported.start, "2026-09-07");
}

#[tokio::test]
async fn http_garbage_import_is_a_format_error() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .json(&serde_json::json!({ "year": 2026 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_month_out_of_range_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/month/13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_clear_leaves_an_empty_collection_without_revision() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let name = format!("pepe-{}", unique_suffix());
    create_entry(
        &client,
        &server.base_url,
        &name,
        "Otro",
        "2026-11-02",
        "2026-11-02",
    )
    .await;

    let cleared: CollectionDto = client
        .post(format!("{}/api/clear", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cleared.entries.is_empty());
    assert!(cleared.revision.is_none());

    let listed: CollectionDto = client
        .get(format!("{}/api/entries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.entries.is_empty());
}
