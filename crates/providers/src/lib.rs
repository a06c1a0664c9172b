//! Model backend implementations for Deskhand.
//!
//! All providers implement the `deskhand_core::Provider` trait. The factory
//! builds the configured provider from `AppConfig`.

pub mod factory;
pub mod openai_compat;

pub use factory::build_provider;
pub use openai_compat::OpenAiCompatProvider;
