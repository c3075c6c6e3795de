pub mod embedding_port;
pub mod user_repository;
pub mod vector_store;
