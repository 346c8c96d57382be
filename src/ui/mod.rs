// src/ui/mod.rs
pub mod calendar;
pub mod chat;
pub mod latest;
