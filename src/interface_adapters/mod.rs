pub mod clients;
pub mod handlers;
pub mod http;
pub mod net;
pub mod protocol;
pub mod routes;
pub mod state;
