use std::sync::Arc;

use auth::Authenticator;
use auth::SigningContext;
use auth_service::account::service::AccountService;
use auth_service::config::run_mode;
use auth_service::config::Config;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::GrpcUserDirectory;
use auth_service::outbound::SmtpEmailDispatcher;
use auth_service::proto::auth::auth_service_server::AuthServiceServer;
use auth_service::telemetry;
use tonic::transport::Server;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let run_mode = run_mode();
    telemetry::init(&run_mode);

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        run_mode = %run_mode,
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        user_directory_url = %config.user_directory.grpc_url,
        access_ttl_seconds = config.jwt.access_ttl_seconds,
        refresh_ttl_seconds = config.jwt.refresh_ttl_seconds,
        mail_host = %config.mail.host,
        "Configuration loaded"
    );

    let signing_context = SigningContext::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_ttl()?,
        config.jwt.refresh_ttl()?,
    )?;
    let authenticator = Arc::new(Authenticator::new(signing_context));

    let user_directory = Arc::new(GrpcUserDirectory::connect(&config.user_directory).await?);
    let email_dispatcher = Arc::new(SmtpEmailDispatcher::new(&config.mail)?);

    let account_service = Arc::new(AccountService::new(
        user_directory,
        email_dispatcher,
        authenticator,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&account_service));
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(Arc::clone(&account_service));
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(AuthServiceServer::new(grpc_service))
            .serve(grpc_address)
            .await
    });

    match tokio::try_join!(http_server, grpc_server) {
        Ok((Err(e), _)) => tracing::error!(error = %e, "Http server error"),
        Ok((_, Err(e))) => tracing::error!(error = %e, "gRpc server error"),
        Ok((Ok(()), Ok(()))) => tracing::info!("Servers exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    };

    Ok(())
}
