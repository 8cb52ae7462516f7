use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::user::models::NewUser;
use account_service::domain::user::models::Role;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::ResetNotifier;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::user::errors::NotifierError;
use account_service::user::errors::UserError;
use async_trait::async_trait;
use auth::Authenticator;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory account directory substituted for Postgres through the
/// repository port.
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<i64, User>>,
    next_id: Mutex<i64>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Test hook: flip an account's role directly in the store.
    pub fn set_role(&self, email: &str, role: Role) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.values_mut().find(|u| u.email.as_str() == email) {
            user.role = role;
        }
    }

    /// Test hook: drop an account, simulating deletion behind a live token.
    pub fn remove(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        users.retain(|_, u| u.email.as_str() != email);
    }

    pub fn id_of(&self, email: &str) -> Option<i64> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|u| u.email.as_str() == email)
            .map(|u| u.id.0)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserDirectory {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let created = User {
            id: UserId(id),
            name: user.name,
            email: user.email,
            phone: None,
            role: user.role,
            password_hash: user.password_hash,
            addresses: vec![],
            cart_items: vec![],
        };
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id.0)
            .ok_or(UserError::NotFound(id.to_string()))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

/// Notifier fake that records every handed-off link instead of sending.
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<String> {
        let sent = self.sent.lock().unwrap();
        sent.iter()
            .filter(|(r, _)| r == recipient)
            .map(|(_, link)| link.clone())
            .collect()
    }

    pub fn total_sent(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ResetNotifier for RecordingNotifier {
    async fn send_reset_link(&self, recipient: &str, link: &str) -> Result<(), NotifierError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((recipient.to_string(), link.to_string()));
        Ok(())
    }
}

/// Test application that spawns the real router on a random port with fakes
/// injected through the same constructors production uses.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserDirectory>,
    pub notifier: Arc<RecordingNotifier>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserDirectory::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, 24));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&notifier),
            Arc::clone(&authenticator),
            format!("{}/", address),
        ));

        let router = create_router(user_service, Arc::clone(&authenticator));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            notifier,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Register an account and return its id.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> i64 {
        let response = self
            .post("/users/signup")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute signup");
        assert!(response.status().is_success(), "signup failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse signup");
        body["data"]["id"].as_i64().expect("missing id")
    }

    /// Log in and return the issued bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/users/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login");
        assert!(response.status().is_success(), "login failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse login");
        body["data"]["access_token"]
            .as_str()
            .expect("missing access_token")
            .to_string()
    }
}
