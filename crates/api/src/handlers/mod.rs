pub mod dashboard;
pub mod layouts;
pub mod notifications;
pub mod session;
