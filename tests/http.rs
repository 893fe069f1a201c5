use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Activity {
    id: String,
    category: u8,
    name: String,
    calories: u32,
    date: String,
}

#[derive(Debug, Deserialize)]
struct Tracker {
    food_calories: u64,
    exercise_calories: u64,
    net_balance: i64,
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    activities: Vec<Activity>,
    active_id: String,
    tracker: Tracker,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    label: String,
    data: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    labels: Vec<String>,
    datasets: Vec<Dataset>,
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
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("calorie_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_calorie_tracker"))
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

async fn restart(client: &Client, base_url: &str) -> StateResponse {
    client
        .post(format!("{base_url}/api/restart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn save(client: &Client, base_url: &str, body: serde_json::Value) -> StateResponse {
    let response = client
        .post(format!("{base_url}/api/activities"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_save_updates_tracker() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let empty = restart(&client, &server.base_url).await;
    assert!(empty.activities.is_empty());

    save(
        &client,
        &server.base_url,
        serde_json::json!({ "category": 1, "name": " Salad ", "calories": 500, "date": "2024-01-01" }),
    )
    .await;
    let state = save(
        &client,
        &server.base_url,
        serde_json::json!({ "category": 2, "name": "Run", "calories": 200, "date": "2024-01-01" }),
    )
    .await;

    assert_eq!(state.activities.len(), 2);
    assert_eq!(state.activities[0].name, "Salad");
    assert_eq!(state.activities[1].category, 2);
    assert!(!state.activities[0].id.is_empty());
    assert_eq!(state.tracker.food_calories, 500);
    assert_eq!(state.tracker.exercise_calories, 200);
    assert_eq!(state.tracker.net_balance, 300);
}

#[tokio::test]
async fn http_rejects_invalid_form() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    restart(&client, &server.base_url).await;

    for body in [
        serde_json::json!({ "category": 1, "name": "   ", "calories": 100 }),
        serde_json::json!({ "category": 1, "name": "Tea", "calories": 0 }),
        serde_json::json!({ "category": 9, "name": "Tea", "calories": 10 }),
    ] {
        let response = client
            .post(format!("{}/api/activities", server.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let state: StateResponse = client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(state.activities.is_empty());
}

#[tokio::test]
async fn http_edit_replaces_in_place() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    restart(&client, &server.base_url).await;

    let state = save(
        &client,
        &server.base_url,
        serde_json::json!({ "category": 1, "name": "Salad", "calories": 300, "date": "2024-01-01" }),
    )
    .await;
    let id = state.activities[0].id.clone();

    let editing: StateResponse = client
        .post(format!("{}/api/activities/{id}/edit", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(editing.active_id, id);

    let current: Option<Activity> = client
        .get(format!("{}/api/edit", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.map(|activity| activity.id), Some(id.clone()));

    let state = save(
        &client,
        &server.base_url,
        serde_json::json!({ "category": 1, "name": "Salad", "calories": 350, "date": "2024-01-01" }),
    )
    .await;
    assert_eq!(state.activities.len(), 1);
    assert_eq!(state.activities[0].id, id);
    assert_eq!(state.activities[0].calories, 350);
    assert!(state.active_id.is_empty());
}

#[tokio::test]
async fn http_delete_search_and_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    restart(&client, &server.base_url).await;

    for (category, name, calories, date) in [
        (1, "Orange juice", 120, "2024-01-02"),
        (1, "Pasta", 600, "2024-01-01"),
        (2, "Swim", 400, "2024-01-02"),
        (1, "Orange", 80, "2024-01-02"),
    ] {
        save(
            &client,
            &server.base_url,
            serde_json::json!({ "category": category, "name": name, "calories": calories, "date": date }),
        )
        .await;
    }

    let hits: Vec<Activity> = client
        .get(format!("{}/api/activities?q=ORANGE", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);

    let chart: ChartData = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(chart.datasets[0].label, "Calories (Food)");
    assert_eq!(chart.datasets[0].data, vec![600, 200]);
    assert_eq!(chart.datasets[1].data, vec![0, 400]);

    let pasta = hits_for(&client, &server.base_url, "pasta").await;
    let state: StateResponse = client
        .delete(format!("{}/api/activities/{}", server.base_url, pasta.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state.activities.len(), 3);
    assert!(state.activities.iter().all(|activity| activity.id != pasta.id));
    assert!(state.activities.iter().all(|activity| !activity.date.is_empty()));
}

#[tokio::test]
async fn http_unknown_action_is_ignored() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    restart(&client, &server.base_url).await;
    save(
        &client,
        &server.base_url,
        serde_json::json!({ "category": 2, "name": "Walk", "calories": 90 }),
    )
    .await;

    for action in [
        serde_json::json!({ "type": "launch-rocket" }),
        serde_json::json!({ "type": "launch-rocket", "payload": { "id": "x", "speed": 9 } }),
    ] {
        let response = client
            .post(format!("{}/api/dispatch", server.base_url))
            .json(&action)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let state: StateResponse = response.json().await.unwrap();
        assert_eq!(state.activities.len(), 1);
        assert_eq!(state.tracker.net_balance, -90);
    }

    let state: StateResponse = client
        .post(format!("{}/api/dispatch", server.base_url))
        .json(&serde_json::json!({ "type": "restart-app", "payload": {} }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(state.activities.is_empty());
}

async fn hits_for(client: &Client, base_url: &str, query: &str) -> Activity {
    let mut hits: Vec<Activity> = client
        .get(format!("{base_url}/api/activities?q={query}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    hits.remove(0)
}
