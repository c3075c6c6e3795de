pub mod hashing;
pub mod openai;
mod response;
pub mod voyage;
