//! 浏览器能力封装
//!
//! 为核心库的抽象提供浏览器实现：
//! - `FetchClient`: 基于 fetch 的 `HttpClient`，带超时
//! - `BrowserStorage`: 基于 LocalStorage 的 `CredentialStore`
//! - `SignalCell`: 基于 Leptos 信号的 `StateCell`

mod cell;
mod http;
pub mod router;
mod storage;

pub use cell::SignalCell;
pub use http::FetchClient;
pub use storage::BrowserStorage;
