pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;

pub use domain::account;

// Include the generated proto code
pub mod proto {
    pub mod auth {
        tonic::include_proto!("auth.v1");
    }

    pub mod user {
        tonic::include_proto!("user.v1");
    }
}
