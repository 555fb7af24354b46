pub mod coordinate;
pub mod error;
pub mod provider;
pub mod request;
pub mod transport;
