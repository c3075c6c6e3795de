pub mod migrations;
pub mod user_repo;
