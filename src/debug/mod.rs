// src/debug/mod.rs

pub mod svg;
