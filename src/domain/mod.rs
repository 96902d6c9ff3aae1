pub mod audio;
pub mod document;
pub mod podcast;
pub mod script;
pub mod text;
