/// Liveness endpoints polled by the hosting platform
pub mod health;
