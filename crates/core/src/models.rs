pub mod audit;
pub mod autorole;
pub mod ownership;
pub mod permissions;
pub mod ticket;
pub mod validation;
