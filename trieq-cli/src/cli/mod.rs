pub mod args;
pub mod render;
pub mod response;
pub mod settings;
