pub mod entities;
pub mod table;

pub use entities::{Attendance, Client, Guard, Payment, Schedule, Visitor};
pub use table::{Table, TableRecord};
