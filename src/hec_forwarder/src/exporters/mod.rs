pub mod event_sink;
pub mod hec_forward;
