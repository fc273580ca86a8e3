pub mod access_token;
pub mod client;
pub mod common;
pub mod group;
pub mod role;
pub mod user;

pub use access_token::*;
pub use client::*;
pub use common::*;
pub use group::*;
pub use role::*;
pub use user::*;
