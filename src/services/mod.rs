pub mod booking;
pub mod calendar;
pub mod crm;
pub mod messaging;
pub mod phone;
pub mod validation;
