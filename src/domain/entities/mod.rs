pub mod attendance;
pub mod client;
pub mod guard;
pub mod occurrence;
pub mod payment;
pub mod schedule;
pub mod visitor;

pub use attendance::Attendance;
pub use client::{Client, ClientPatch, NewClient};
pub use guard::{Guard, GuardPatch, GuardStatus, NewGuard};
pub use occurrence::{NewOccurrence, Occurrence, OccurrenceStatus, Severity};
pub use payment::{NewPayment, Payment, PaymentStatus};
pub use schedule::{NewSchedule, Schedule, SchedulePatch};
pub use visitor::{NewVisitor, Visitor};
