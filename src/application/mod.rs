pub mod ports;
pub mod services;

pub use services::{
    AttendanceService, AuthService, ClientService, GuardService, OccurrenceService,
    PaymentService, ReportService, ScheduleService, VisitorService,
};
