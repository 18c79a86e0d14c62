pub mod codec;
pub mod component;
pub mod delegated_authentication;
pub mod errors;
pub mod flows;
pub mod handler;
