pub mod document;
pub mod pack;
pub mod record;
