pub mod similarity_result;
pub mod user_record;
