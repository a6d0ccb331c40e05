pub mod app;
mod deserializers;
mod error;
mod extract;
mod routes;

pub use error::ApiError;
