pub mod checkout;
pub mod event;
pub mod ports;
pub mod session;
pub mod view;
