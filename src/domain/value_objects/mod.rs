pub mod latency_modes;
pub mod playback_policies;
pub mod simulcasts;
pub mod stream_status_reports;
pub mod stream_statuses;
pub mod streams;
