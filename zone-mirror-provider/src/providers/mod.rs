//! Provider 实现模块

pub(crate) mod common;

mod cloudflare;

pub use cloudflare::CloudflareProvider;
