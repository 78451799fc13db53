mod client;
mod errors;
pub mod normalize;
pub mod parse;
pub mod types;
pub use self::client::Client;
pub use self::errors::FetchError;
