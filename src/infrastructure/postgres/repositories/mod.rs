pub mod simulcasts;
pub mod status_credentials;
pub mod streams;
