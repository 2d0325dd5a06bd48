//! In-process mock of the practice backend
//!
//! Records every request as `"METHOD /path"` and requires
//! `Authorization: Bearer <TOKEN>` on everything but `/auth/login`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use care_client::{CareClient, SessionStore};
use serde_json::{Value, json};

pub const TOKEN: &str = "tok-1";
pub const PASSWORD: &str = "segredo1";

#[derive(Debug, Default)]
pub struct Backend {
    requests: Mutex<Vec<String>>,
    messages: Mutex<Vec<Value>>,
}

impl Backend {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests matching `"METHOD /path"` exactly
    pub fn count_of(&self, route: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == route)
            .count()
    }
}

pub fn admin() -> Value {
    json!({ "id": 1, "name": "Admin", "email": "admin@clinica.pt", "role": "ADMIN" })
}

pub fn users() -> Value {
    json!([
        admin(),
        { "id": 2, "name": "Maria Silva", "email": "maria@clinica.pt", "role": "PAI" },
        { "id": 3, "name": "Dr. João", "email": "joao@clinica.pt", "role": "PSICOLOGO" }
    ])
}

pub fn children() -> Value {
    json!([
        { "id": 10, "name": "Ana Silva", "birthdate": "2016-05-20", "parentId": 2 },
        { "id": 11, "name": "Rui Costa", "birthdate": "2015-01-02", "parentId": 2 },
        { "id": 12, "name": "Beatriz Anaya", "birthdate": "2017-09-12", "parentId": 2, "status": "inactive" }
    ])
}

pub fn consultations() -> Value {
    json!([
        { "id": 100, "date": "2024-03-10", "time": "09:00", "reason": "Avaliação",
          "status": "done", "childId": 10, "psychologistId": 3, "child": { "id": 10, "name": "Ana Silva" } },
        { "id": 101, "date": "2024-03-15", "time": "14:30", "reason": "Acompanhamento",
          "childId": 11, "psychologistId": 3, "child": { "id": 11, "name": "Rui Costa" } },
        { "id": 102, "date": "2024-03-20", "time": "10:00", "reason": "Retorno",
          "childId": 10, "psychologistId": 3, "child": { "id": 10, "name": "Ana Silva" } }
    ])
}

async fn guard(State(backend): State<Arc<Backend>>, request: Request, next: Next) -> Response {
    backend
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));

    if request.uri().path() != "/auth/login" {
        let expected = format!("Bearer {TOKEN}");
        let authorized = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token inválido" })))
                .into_response();
        }
    }
    next.run(request).await
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "admin@clinica.pt" && body["password"] == PASSWORD {
        Json(json!({ "user": admin(), "token": TOKEN })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Credenciais inválidas" })))
            .into_response()
    }
}

async fn create_user(Json(mut body): Json<Value>) -> Json<Value> {
    body["id"] = json!(99);
    if let Some(map) = body.as_object_mut() {
        map.remove("password");
    }
    Json(body)
}

async fn update_status(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    let mut user = users()
        .as_array()
        .and_then(|all| all.iter().find(|u| u["id"] == id).cloned())
        .unwrap_or_else(admin);
    user["isActive"] = body["isActive"].clone();
    Json(user)
}

async fn create_consultation(Json(mut body): Json<Value>) -> Json<Value> {
    body["id"] = json!(200);
    Json(body)
}

/// Lite projection filtered server-side
async fn consultations_lite(Query(query): Query<std::collections::HashMap<String, String>>) -> Json<Value> {
    let search = query.get("search").map(|s| s.to_lowercase()).unwrap_or_default();
    let rows: Vec<Value> = consultations()
        .as_array()
        .into_iter()
        .flatten()
        .filter(|c| {
            search.is_empty() || c["reason"].as_str().unwrap_or_default().to_lowercase().contains(&search)
        })
        .map(|c| {
            json!({
                "id": c["id"], "date": c["date"], "time": c["time"], "reason": c["reason"],
                "childId": c["childId"], "childName": c["child"]["name"]
            })
        })
        .collect();
    Json(Value::Array(rows))
}

async fn list_messages(State(backend): State<Arc<Backend>>) -> Json<Value> {
    Json(Value::Array(backend.messages.lock().unwrap().clone()))
}

async fn send_message(
    State(backend): State<Arc<Backend>>,
    Path(conversation_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut messages = backend.messages.lock().unwrap();
    let message = json!({
        "id": messages.len() as i64 + 1,
        "conversationId": conversation_id,
        "senderId": 1,
        "content": body["content"],
        "createdAt": format!("2024-03-15T10:{:02}:00Z", messages.len()),
    });
    messages.push(message.clone());
    Json(message)
}

/// Backend state plus its router; `/children/lite` is deliberately absent
pub fn backend() -> (Arc<Backend>, Router) {
    let backend = Arc::new(Backend::default());
    backend.messages.lock().unwrap().extend([
        json!({ "id": 1, "conversationId": 5, "senderId": 2, "content": "Olá", "createdAt": "2024-03-15T09:00:00Z" }),
        json!({ "id": 2, "conversationId": 5, "senderId": 1, "content": "Bom dia", "createdAt": "2024-03-15T09:01:00Z" }),
    ]);

    let router = Router::new()
        .route("/auth/login", post(login))
        .route("/users", get(|| async { Json(users()) }).post(create_user))
        .route("/users/{id}/status", patch(update_status))
        .route("/children", get(|| async { Json(children()) }))
        .route(
            "/consultations",
            get(|| async { Json(consultations()) }).post(create_consultation),
        )
        .route("/consultations/lite", get(consultations_lite))
        .route(
            "/chats/conversations/{id}/messages",
            get(list_messages).post(send_message),
        )
        .layer(middleware::from_fn_with_state(backend.clone(), guard))
        .with_state(backend.clone());

    (backend, router)
}

/// Client over the mock backend with a token already in the session
pub fn signed_in_client(router: Router) -> CareClient {
    let session = SessionStore::new();
    session
        .set_user(serde_json::from_value(admin()).unwrap(), TOKEN)
        .unwrap();
    CareClient::in_process(router, session)
}
