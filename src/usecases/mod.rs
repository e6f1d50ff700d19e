pub mod errors;
pub mod gateway;
pub mod simulcasts;
pub mod stream_status;
pub mod streams;
