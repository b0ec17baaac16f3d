pub mod cleanup;
pub mod download;
pub mod editor;
pub mod http;
pub mod install;
pub mod lab;
pub mod platform;
pub mod runtime;
pub mod setup;
