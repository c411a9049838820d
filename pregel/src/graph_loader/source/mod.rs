pub mod binary_loader;
pub mod text_loader;
