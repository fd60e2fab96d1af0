//! Personal site content manager: posts, projects and notes kept as markdown
//! files in category folders, served as HTML. Writes sit behind a single
//! bcrypt-hashed key.

pub mod category;
pub mod context;
pub mod controllers;
pub mod error;
pub mod gate;
pub mod markdown;
pub mod metadata;
pub mod renderer;
pub mod repository;
pub mod slug;
