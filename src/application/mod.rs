pub mod add_user;
pub mod embed;
pub mod rank;
pub mod registry;
pub mod similar;
pub mod stats;
pub mod user_index;
