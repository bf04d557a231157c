// ABOUTME: Library root for statefulchat — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod agent;
pub mod app;
pub mod config;
pub mod console;
pub mod menu;
pub mod render;
pub mod session;
