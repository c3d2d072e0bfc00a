pub mod log;
pub mod new;
pub mod projects;
pub mod push;
pub mod setup;
pub mod smart;
pub mod status;
