pub mod booking;
pub mod response;
