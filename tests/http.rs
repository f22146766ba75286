use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const CLIENT: &str = "client-42";

struct TestServer {
    base_url: String,
    child: Child,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}?client={CLIENT}", self.base_url)
    }
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
    path.push(format!("daily_log_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        let url = format!("{base_url}/api/meal-plan?client={CLIENT}");
        if let Ok(resp) = client.get(url).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_daily_log"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        // nothing listens on the discard port, so every transmission fails
        .env("WEBHOOK_URL", "http://127.0.0.1:9/hook")
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

async fn get_json(client: &Client, url: String) -> Value {
    let response = client.get(url).send().await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn post_json(client: &Client, url: String) -> Value {
    let response = client.post(url).send().await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn commit(client: &Client, server: &TestServer, date: &str, record: &Value) -> Value {
    let response = client
        .post(server.url(&format!("/api/days/{date}/commit")))
        .json(record)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_requests_without_client_are_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let api = client
        .get(format!("{}/api/days/2024-01-01", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::BAD_REQUEST);

    let page = client
        .get(format!("{}/?client=", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::BAD_REQUEST);
    assert!(page.text().await.unwrap().contains("Client ID Missing"));

    let ok = client.get(server.url("/meal-plan")).send().await.unwrap();
    assert!(ok.status().is_success());
}

#[tokio::test]
async fn http_unsaved_day_returns_defaults() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let day = get_json(&client, server.url("/api/days/2023-02-01")).await;
    assert_eq!(day["completed"], false);
    assert_eq!(day["record"]["trainingType"], "");
    assert_eq!(day["record"]["bathroom"], "1");
    assert_eq!(day["record"]["mealOptions"], json!([1, 1, 1, 1]));
    assert_eq!(day["record"]["biofeedback"]["digestion"], 5);
}

#[tokio::test]
async fn http_saved_day_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut record = get_json(&client, server.url("/api/days/2023-03-07")).await["record"].clone();
    record["trainingType"] = json!("weight");
    record["steps"] = json!("7500");
    record["meals"][2] = json!("salmon");
    record["biofeedback"]["sleep"] = json!(2);

    let response = client
        .put(server.url("/api/days/2023-03-07"))
        .json(&record)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let day = get_json(&client, server.url("/api/days/2023-03-07")).await;
    assert_eq!(day["record"], record);

    record["biofeedback"]["sleep"] = json!(9);
    let rejected = client
        .put(server.url("/api/days/2023-03-07"))
        .json(&record)
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_commit_survives_unreachable_webhook_and_builds_streak() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let blank = get_json(&client, server.url("/api/days/2024-06-15")).await["record"].clone();
    let saturday = commit(&client, &server, "2024-06-15", &blank).await;
    assert!(saturday.get("weeklySummary").is_none());

    let mut record = blank.clone();
    record["notes"] = json!("felt strong");
    record["meals"][0] = json!("eggs");
    let sunday = commit(&client, &server, "2024-06-16", &record).await;
    assert_eq!(sunday["streak"], 2);
    assert_eq!(sunday["message"], "Nice work — 2-day streak!");
    assert_eq!(sunday["weeklySummary"]["daysLogged"], 2);
    assert_eq!(sunday["weeklySummary"]["weekStart"], "2024-06-10");
    assert_eq!(sunday["weeklySummary"]["totalMealsLogged"], 1);

    let again = commit(&client, &server, "2024-06-16", &record).await;
    assert_eq!(again["weeklySummary"]["daysLogged"], 2);

    let day = get_json(&client, server.url("/api/days/2024-06-16")).await;
    assert_eq!(day["completed"], true);
    assert_eq!(day["record"], record);

    let missing_body = client
        .post(server.url("/api/days/2024-06-18/commit"))
        .send()
        .await
        .unwrap();
    assert!(missing_body.status().is_client_error());

    let streak = get_json(&client, server.url("/api/days/2024-06-17/streak")).await;
    assert_eq!(streak["streak"], 3);

    let week = get_json(&client, server.url("/api/weeks/2024-06-12")).await;
    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[5]["completed"], true);
    assert_eq!(days[0]["completed"], false);
}

#[tokio::test]
async fn http_meal_plan_feeds_daily_log() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut plan = get_json(&client, server.url("/api/meal-plan")).await;
    plan["meals"][0][1] = json!("greek yogurt");
    plan["supplements"] = json!("vitamin d");
    let response = client
        .put(server.url("/api/meal-plan"))
        .json(&plan)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let day = post_json(&client, server.url("/api/days/2023-04-04/meals/1/options/2")).await;
    assert_eq!(day["record"]["meals"][0], "greek yogurt");
    assert_eq!(day["record"]["mealOptions"], json!([2, 1, 1, 1]));

    let unchanged = post_json(&client, server.url("/api/days/2023-04-04/meals/2/options/4")).await;
    assert_eq!(unchanged["record"]["meals"][1], "");
    assert_eq!(unchanged["record"]["mealOptions"], json!([2, 1, 1, 1]));

    let day = post_json(&client, server.url("/api/days/2023-04-04/supplements/paste")).await;
    assert_eq!(day["record"]["supplements"], "vitamin d");

    let out_of_range = client
        .post(server.url("/api/days/2023-04-04/meals/5/options/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_weekly_summary_averages_logged_steps() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for (date, steps) in [("2022-06-06", "10000"), ("2022-06-08", "8000")] {
        let mut record = get_json(&client, server.url(&format!("/api/days/{date}"))).await["record"].clone();
        record["steps"] = json!(steps);
        record["trainingType"] = json!("cardio");
        let response = client
            .put(server.url(&format!("/api/days/{date}")))
            .json(&record)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let summary = get_json(&client, server.url("/api/weeks/2022-06-12/summary")).await;
    assert_eq!(summary["stepsAverage"], 9000);
    assert_eq!(summary["daysLogged"], 0);
    assert_eq!(summary["trainingSessions"]["cardio"], 2);
    assert_eq!(summary["totalMealsLogged"], 0);
}
