#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SigningContext;
use auth_service::account::errors::DeliveryError;
use auth_service::account::models::EmailAddress;
use auth_service::account::models::VerificationEmail;
use auth_service::account::ports::EmailDispatcher;
use auth_service::account::service::AccountService;
use auth_service::config::UserDirectoryConfig;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::GrpcUserDirectory;
use auth_service::proto::auth::auth_service_client::AuthServiceClient;
use auth_service::proto::auth::auth_service_server::AuthServiceServer;
use auth_service::proto::user::user_directory_server::UserDirectory as UserDirectoryProto;
use auth_service::proto::user::user_directory_server::UserDirectoryServer;
use auth_service::proto::user::CreateUserRequest;
use auth_service::proto::user::CreateUserResponse;
use auth_service::proto::user::GetUserByEmailRequest;
use auth_service::proto::user::GetUserByEmailResponse;
use auth_service::proto::user::VerifyEmailRequest;
use auth_service::proto::user::VerifyEmailResponse;
use chrono::Duration;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;
use tonic::Request;
use tonic::Response;
use tonic::Status;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User row kept by [`FakeUserDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub description: String,
    pub profile_image: Vec<u8>,
    pub email_verified: bool,
}

impl StoredUser {
    pub fn new(id: &str, email: &str, username: &str, password_hash: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            description: String::new(),
            profile_image: Vec::new(),
            email_verified: false,
        }
    }
}

/// In-memory stand-in for the user service, served over real gRPC.
///
/// Ids are assigned sequentially as `u1`, `u2`, ...
#[derive(Clone, Default)]
pub struct FakeUserDirectory {
    users: Arc<Mutex<Vec<StoredUser>>>,
}

impl FakeUserDirectory {
    pub fn seed(&self, user: StoredUser) {
        self.users.lock().unwrap().push(user);
    }

    pub fn find_by_email(&self, email: &str) -> Option<StoredUser> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn find_by_id(&self, id: &str) -> Option<StoredUser> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[tonic::async_trait]
impl UserDirectoryProto for FakeUserDirectory {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let request = request.into_inner();
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == request.email) {
            return Err(Status::already_exists("email already exists"));
        }

        let id = format!("u{}", users.len() + 1);
        users.push(StoredUser {
            id: id.clone(),
            email: request.email,
            username: request.username,
            password_hash: request.password_hash,
            description: request.description,
            profile_image: request.profile_image,
            email_verified: false,
        });

        Ok(Response::new(CreateUserResponse { id }))
    }

    async fn get_user_by_email(
        &self,
        request: Request<GetUserByEmailRequest>,
    ) -> Result<Response<GetUserByEmailResponse>, Status> {
        let email = request.into_inner().email;

        self.find_by_email(&email)
            .map(|user| {
                Response::new(GetUserByEmailResponse {
                    id: user.id,
                    username: user.username,
                    password_hash: user.password_hash,
                })
            })
            .ok_or_else(|| Status::not_found("user not found"))
    }

    async fn verify_email(
        &self,
        request: Request<VerifyEmailRequest>,
    ) -> Result<Response<VerifyEmailResponse>, Status> {
        let id = request.into_inner().id;
        let mut users = self.users.lock().unwrap();

        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.email_verified = true;
                Ok(Response::new(VerifyEmailResponse {}))
            }
            None => Err(Status::not_found("user not found")),
        }
    }
}

/// Email dispatcher that records what would have been sent.
#[derive(Clone, Default)]
pub struct RecordingEmailDispatcher {
    sent: Arc<Mutex<Vec<(String, VerificationEmail)>>>,
    failing: bool,
}

impl RecordingEmailDispatcher {
    /// A dispatcher whose every delivery fails after being recorded.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, VerificationEmail)> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait until at least `count` emails were handed over; delivery runs in
    /// the background of Register.
    pub async fn wait_for(&self, count: usize) -> Vec<(String, VerificationEmail)> {
        for _ in 0..200 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("expected {} verification emails, got {}", count, self.sent().len());
    }
}

#[async_trait]
impl EmailDispatcher for RecordingEmailDispatcher {
    async fn send_verification(
        &self,
        to: &EmailAddress,
        email: &VerificationEmail,
    ) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.as_str().to_string(), email.clone()));

        if self.failing {
            return Err(DeliveryError::Send("smtp server unreachable".to_string()));
        }
        Ok(())
    }
}

/// Test application serving HTTP and gRPC on random ports, backed by a fake
/// user directory.
pub struct TestApp {
    pub address: String,
    pub grpc_address: String,
    pub directory: FakeUserDirectory,
    pub emails: RecordingEmailDispatcher,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(RecordingEmailDispatcher::default()).await
    }

    pub async fn spawn_with(emails: RecordingEmailDispatcher) -> Self {
        let directory = FakeUserDirectory::default();
        let directory_address = serve_directory(directory.clone()).await;

        let user_directory = GrpcUserDirectory::connect(&UserDirectoryConfig {
            grpc_url: format!("http://{}", directory_address),
            timeout_ms: 3000,
        })
        .await
        .expect("Failed to connect to fake user directory");

        let authenticator = Arc::new(Authenticator::new(
            SigningContext::new(TEST_SECRET, Duration::minutes(15), Duration::days(7))
                .expect("Invalid signing context"),
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::new(user_directory),
            Arc::new(emails.clone()),
            Arc::clone(&authenticator),
        ));

        let http_listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", http_listener.local_addr().unwrap());
        let router = create_router(Arc::clone(&account_service));
        tokio::spawn(async move {
            axum::serve(http_listener, router).await.expect("Server error");
        });

        let grpc_listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let grpc_address = format!("http://{}", grpc_listener.local_addr().unwrap());
        let grpc_service = AuthGrpcService::new(account_service);
        tokio::spawn(async move {
            Server::builder()
                .add_service(AuthServiceServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(grpc_listener))
                .await
                .expect("gRPC server error");
        });

        Self {
            address,
            grpc_address,
            directory,
            emails,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    pub async fn grpc_client(&self) -> AuthServiceClient<Channel> {
        AuthServiceClient::connect(self.grpc_address.clone())
            .await
            .expect("Failed to connect gRPC client")
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Hash `password` the way registration does and seed a user with it.
    pub fn seed_user(&self, id: &str, email: &str, username: &str, password: &str) {
        let hash = self.authenticator.hash_password(password).unwrap();
        self.directory
            .seed(StoredUser::new(id, email, username, &hash));
    }
}

async fn serve_directory(directory: FakeUserDirectory) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(UserDirectoryServer::new(directory))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("Fake user directory error");
    });

    address
}
