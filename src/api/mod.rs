pub mod events;
pub mod server;
pub mod users;
pub mod ws;
