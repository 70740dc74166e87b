pub mod email;
pub mod grpc;

pub use email::SmtpEmailDispatcher;
pub use grpc::GrpcUserDirectory;
