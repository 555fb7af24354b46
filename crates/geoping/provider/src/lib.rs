mod fixed;
#[cfg(feature = "provider-http")]
mod http;
mod unsupported;

pub use self::fixed::FixedProvider;
#[cfg(feature = "provider-http")]
pub use self::http::HttpProvider;
pub use self::unsupported::UnsupportedProvider;
