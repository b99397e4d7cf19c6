//! A stateful stand-in for the wardrobe backend on a wiremock server.
//!
//! Accounts and wardrobes live in memory. Login and signup mint
//! `token-<username>` / `user-<username>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Default)]
struct State {
    accounts: HashMap<String, String>,
    wardrobes: HashMap<String, Vec<Value>>,
}

type Shared = Arc<Mutex<State>>;

pub struct FakeBackend {
    pub server: MockServer,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = Shared::default();

        Mock::given(method("POST"))
            .and(path("/api/signup"))
            .respond_with(Signup(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(Login(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/users/[^/]+/wardrobe$"))
            .respond_with(ListItems(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/api/users/[^/]+/wardrobe$"))
            .respond_with(AddItem(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/users/[^/]+/wardrobe/[^/]+$"))
            .respond_with(DeleteItem(state.clone()))
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Register an account directly.
    pub fn add_account(&self, username: &str, password: &str) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(username.to_string(), password.to_string());
    }

    /// Server-side wardrobe of a user.
    pub fn wardrobe_of(&self, user_id: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .wardrobes
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn requests_to(&self, http_method: &str, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
            .count()
    }
}

fn credentials_of(request: &Request) -> (String, String) {
    let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
    let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
    (field("username"), field("password"))
}

fn auth_response(username: &str) -> Value {
    json!({
        "token": format!("token-{}", username),
        "userId": format!("user-{}", username),
        "username": username
    })
}

fn user_segment(request: &Request) -> String {
    request
        .url
        .path()
        .split('/')
        .nth(3)
        .unwrap_or_default()
        .to_string()
}

/// Value of a text field in a multipart body.
fn form_field(body: &[u8], name: &str) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let marker = format!("name=\"{}\"", name);
    let start = text.find(&marker)?;
    let rest = &text[start..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let rest = &rest[value_start..];
    let value_end = rest.find("\r\n")?;
    Some(rest[..value_end].to_string())
}

struct Signup(Shared);

impl Respond for Signup {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let (username, password) = credentials_of(request);
        let mut state = self.0.lock().unwrap();
        if state.accounts.contains_key(&username) {
            return ResponseTemplate::new(409)
                .set_body_json(json!({"message": "Username already exists"}));
        }
        state.accounts.insert(username.clone(), password);
        ResponseTemplate::new(201).set_body_json(auth_response(&username))
    }
}

struct Login(Shared);

impl Respond for Login {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let (username, password) = credentials_of(request);
        let state = self.0.lock().unwrap();
        match state.accounts.get(&username) {
            Some(stored) if *stored == password => {
                ResponseTemplate::new(200).set_body_json(auth_response(&username))
            }
            _ => ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Invalid username or password"})),
        }
    }
}

struct ListItems(Shared);

impl Respond for ListItems {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let user_id = user_segment(request);
        let state = self.0.lock().unwrap();
        let items = state.wardrobes.get(&user_id).cloned().unwrap_or_default();
        ResponseTemplate::new(200).set_body_json(Value::Array(items))
    }
}

struct AddItem(Shared);

impl Respond for AddItem {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let user_id = user_segment(request);
        let field = |name: &str| form_field(&request.body, name);
        let (Some(category), Some(style), Some(weather)) =
            (field("category"), field("style"), field("weather"))
        else {
            return ResponseTemplate::new(400)
                .set_body_json(json!({"message": "Missing required fields"}));
        };

        let item = json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "user_id": user_id,
            "category": category,
            "style": style,
            "weather": weather,
            "image_url": null,
            "dominant_colors": [],
            "detected_by_ai": false
        });
        let mut state = self.0.lock().unwrap();
        state
            .wardrobes
            .entry(user_id)
            .or_default()
            .push(item.clone());
        ResponseTemplate::new(201).set_body_json(item)
    }
}

struct DeleteItem(Shared);

impl Respond for DeleteItem {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let user_id = user_segment(request);
        let item_id = request.url.path().rsplit('/').next().unwrap_or_default();
        let mut state = self.0.lock().unwrap();
        let items = state.wardrobes.entry(user_id).or_default();
        let before = items.len();
        items.retain(|item| item["id"] != item_id);
        if items.len() == before {
            return ResponseTemplate::new(404).set_body_json(json!({"message": "Item not found"}));
        }
        ResponseTemplate::new(200).set_body_json(json!({"message": "Item deleted successfully"}))
    }
}
