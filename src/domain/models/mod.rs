pub mod subscriber;
pub mod property;
pub mod unit;
pub mod tenant;
pub mod payment;
