pub mod private;
pub mod rest;

pub use rest::{RestClient, RestRequest};
