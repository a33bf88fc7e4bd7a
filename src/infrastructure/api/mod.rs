//! HTTP adapter for the remote chat API.

mod client;
mod dto;

pub use client::HttpChatClient;
