pub mod mixtapes;
pub mod upload;
