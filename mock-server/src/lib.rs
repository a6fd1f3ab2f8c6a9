use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
}

#[derive(Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct EditCategory {
    pub id: u64,
    pub name: String,
    pub is_active: bool,
}

struct User {
    name: String,
    email: String,
    password: String,
}

struct CategoryRecord {
    owner: String,
    category: Category,
}

/// Users keyed by email, live tokens mapped to the owning email, and every
/// user's categories under one id sequence.
#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
    tokens: HashMap<String, String>,
    categories: BTreeMap<u64, CategoryRecord>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

/// Error response carrying `{ "errors": "<message>" }`.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized")
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "category not found")
    }
}

// Extractor rejections keep axum's status but use the same error body.
impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiFailure {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "errors": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/user/register", post(register))
        .route("/api/user/login", post(login))
        .route("/api/user/profile", get(profile))
        .route("/api/category", get(list_categories))
        .route("/api/category/create", post(create_category))
        .route("/api/category/update", put(update_category))
        .route("/api/category/{id}", delete(delete_category))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Resolve the bearer token to the owning user's email.
fn authorize(store: &Store, headers: &HeaderMap) -> Result<String, ApiFailure> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(ApiFailure::unauthorized)?;
    store
        .tokens
        .get(token)
        .cloned()
        .ok_or_else(ApiFailure::unauthorized)
}

async fn register(
    State(db): State<Db>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Profile>>), ApiFailure> {
    let Json(input) = payload?;
    if input.name.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "name, email and password are required",
        ));
    }
    let mut store = db.write().await;
    if store.users.contains_key(&input.email) {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "email already registered"));
    }
    let profile = Profile {
        name: input.name.clone(),
        email: input.email.clone(),
    };
    store.users.insert(
        input.email.clone(),
        User {
            name: input.name,
            email: input.email,
            password: input.password,
        },
    );
    tracing::info!(email = %profile.email, "user registered");
    Ok((StatusCode::CREATED, Json(Envelope { data: profile })))
}

async fn login(
    State(db): State<Db>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Envelope<Token>>, ApiFailure> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    let matches = store
        .users
        .get(&input.email)
        .is_some_and(|user| user.password == input.password);
    if !matches {
        return Err(ApiFailure::new(StatusCode::UNAUTHORIZED, "invalid email or password"));
    }
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(token.clone(), input.email);
    Ok(Json(Envelope {
        data: Token { token },
    }))
}

async fn profile(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Profile>>, ApiFailure> {
    let store = db.read().await;
    let email = authorize(&store, &headers)?;
    let user = store.users.get(&email).ok_or_else(ApiFailure::unauthorized)?;
    Ok(Json(Envelope {
        data: Profile {
            name: user.name.clone(),
            email: user.email.clone(),
        },
    }))
}

async fn list_categories(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<Category>>>, ApiFailure> {
    let store = db.read().await;
    let owner = authorize(&store, &headers)?;
    let data = store
        .categories
        .values()
        .filter(|record| record.owner == owner)
        .map(|record| record.category.clone())
        .collect();
    Ok(Json(Envelope { data }))
}

async fn create_category(
    State(db): State<Db>,
    headers: HeaderMap,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Category>>), ApiFailure> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    store.next_id += 1;
    let category = Category {
        id: store.next_id,
        name: input.name,
        is_active: input.is_active,
    };
    store.categories.insert(
        category.id,
        CategoryRecord {
            owner,
            category: category.clone(),
        },
    );
    Ok((StatusCode::CREATED, Json(Envelope { data: category })))
}

async fn update_category(
    State(db): State<Db>,
    headers: HeaderMap,
    payload: Result<Json<EditCategory>, JsonRejection>,
) -> Result<Json<Envelope<Category>>, ApiFailure> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    let record = store
        .categories
        .get_mut(&input.id)
        .filter(|record| record.owner == owner)
        .ok_or_else(ApiFailure::not_found)?;
    record.category.name = input.name;
    record.category.is_active = input.is_active;
    Ok(Json(Envelope {
        data: record.category.clone(),
    }))
}

async fn delete_category(
    State(db): State<Db>,
    headers: HeaderMap,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Envelope<Category>>, ApiFailure> {
    let Path(id) = id?;
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    match store.categories.get(&id) {
        Some(record) if record.owner == owner => {}
        _ => return Err(ApiFailure::not_found()),
    }
    let record = store.categories.remove(&id).ok_or_else(ApiFailure::not_found)?;
    Ok(Json(Envelope {
        data: record.category,
    }))
}
