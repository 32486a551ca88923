//! Authentication

mod login;
mod token;

pub use login::LoginFlow;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
