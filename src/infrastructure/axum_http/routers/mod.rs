pub mod simulcasts;
pub mod stream_status;
pub mod streams;
