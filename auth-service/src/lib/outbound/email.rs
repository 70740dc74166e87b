pub mod smtp;
pub mod template;

pub use smtp::SmtpEmailDispatcher;
