pub mod audio;
pub mod host;
pub mod observability;
