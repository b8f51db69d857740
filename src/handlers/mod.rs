// src/handlers/mod.rs
pub mod channel; // 📺 Channel profile + analytics
pub mod video; // 🎬 Video details, trending, categories
pub mod scrape; // 🔗 URL-driven dispatch
pub mod status;
