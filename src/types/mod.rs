pub mod hourly_frame;
pub mod hourly_response;
pub mod hourly_variable;
pub mod station;
