use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenConfig;
use auth::TokenService;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use catalog_service::book::errors::BookError;
use catalog_service::domain::book::models::Book;
use catalog_service::domain::book::models::BookId;
use catalog_service::domain::book::models::BookTitle;
use catalog_service::domain::book::ports::BookRepository;
use catalog_service::domain::book::ports::BookServicePort;
use catalog_service::domain::book::service::BookService;
use catalog_service::domain::user::models::User;
use catalog_service::domain::user::models::Username;
use catalog_service::domain::user::ports::UserRepository;
use catalog_service::domain::user::ports::UserServicePort;
use catalog_service::domain::user::service::UserService;
use catalog_service::inbound::http::middleware::authenticate;
use catalog_service::inbound::http::middleware::require_superuser;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use catalog_service::user::errors::UserError;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const IMPORT_MAX_ROWS: usize = 1000;

/// In-memory stand-in for the users collection. Mirrors the adapter
/// contract, including the unique-username rejection.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameTaken(user.username.to_string()));
        }
        users.insert(user.username.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(username.as_str()).cloned())
    }
}

/// In-memory stand-in for the books collection, insertion-ordered.
/// Enforces the unique-title constraint the way the Postgres index does.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().unwrap();
        if books.iter().any(|b| b.title == book.title) {
            return Err(BookError::TitleTaken(book.title.to_string()));
        }
        books.push(book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let books = self.books.lock().unwrap();
        Ok(books.iter().find(|b| b.id == *id).cloned())
    }

    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>, BookError> {
        let books = self.books.lock().unwrap();
        Ok(books.iter().find(|b| b.title == *title).cloned())
    }

    async fn find_by_title_excluding(
        &self,
        title: &BookTitle,
        excluded: &BookId,
    ) -> Result<Option<Book>, BookError> {
        let books = self.books.lock().unwrap();
        Ok(books
            .iter()
            .find(|b| b.title == *title && b.id != *excluded)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let books = self.books.lock().unwrap();
        Ok(books.clone())
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().unwrap();
        if books
            .iter()
            .any(|b| b.id != book.id && b.title == book.title)
        {
            return Err(BookError::TitleTaken(book.title.to_string()));
        }
        match books.iter_mut().find(|b| b.id == book.id) {
            Some(slot) => {
                *slot = book.clone();
                Ok(book)
            }
            None => Err(BookError::NotFound(book.id.to_string())),
        }
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != *id);
        if books.len() == before {
            return Err(BookError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Test application that spawns the real router on a random port,
/// backed by in-memory repositories.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: Arc<TokenService>,
    pub user_repo: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_service = Arc::new(TokenService::new(&TokenConfig {
            secret: TEST_SECRET.to_string(),
            access_token_ttl_minutes: 30,
        }));

        let user_repo = Arc::new(InMemoryUserRepository::default());
        let book_repo = Arc::new(InMemoryBookRepository::default());

        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&token_service),
        ));
        let book_service: Arc<dyn BookServicePort> =
            Arc::new(BookService::new(book_repo, IMPORT_MAX_ROWS));

        let router = create_router(
            Arc::clone(&user_service),
            Arc::clone(&book_service),
            Arc::clone(&token_service),
        );

        // The production surface mounts no superuser-only routes yet, so
        // the gate is exercised here on a minimal admin route.
        let admin_state = AppState {
            user_service,
            book_service,
            token_service: Arc::clone(&token_service),
        };
        let admin_routes = Router::new()
            .route("/admin/ping", get(|| async { "pong" }))
            .route_layer(middleware::from_fn(require_superuser))
            .route_layer(middleware::from_fn_with_state(admin_state, authenticate));
        let router = router.merge(admin_routes);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service,
            user_repo,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Insert a user directly into the store, bypassing registration.
    /// Lets tests set the flags registration never grants.
    pub async fn seed_user(&self, username: &str, disabled: bool, superuser: bool) {
        let hasher = auth::PasswordHasher::new();
        self.user_repo
            .create(User {
                username: Username::new(username.to_string()).expect("Invalid seed username"),
                email: None,
                full_name: None,
                disabled,
                superuser,
                hashed_password: hasher.hash("seed_password").expect("Failed to hash password"),
                created_at: chrono::Utc::now(),
            })
            .await
            .expect("Failed to seed user");
    }

    /// Register a user and log in, returning a valid bearer token.
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/register")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to register");
        assert!(response.status().is_success(), "registration failed");

        let response = self
            .post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to log in");
        assert!(response.status().is_success(), "login failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}

/// Build a well-formed CSV file with `rows` unique books.
pub fn csv_of(rows: usize) -> Vec<u8> {
    let mut data = String::from("title,author,description,year\n");
    for i in 0..rows {
        data.push_str(&format!(
            "Imported Book {i},Author {i},A perfectly serviceable description.,{}\n",
            1900 + (i % 200)
        ));
    }
    data.into_bytes()
}

/// Multipart form carrying `data` as an uploaded file named `filename`.
pub fn csv_form(filename: &str, data: Vec<u8>) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(data).file_name(filename.to_string()),
    )
}
