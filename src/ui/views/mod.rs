pub mod channels;
pub mod login;

pub use channels::Channels;
pub use login::Login;
