pub mod booking_client;
