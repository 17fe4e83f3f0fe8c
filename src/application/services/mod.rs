pub mod attendance_service;
pub mod auth_service;
pub mod client_service;
pub mod guard_service;
pub mod occurrence_service;
pub mod payment_service;
pub mod report_service;
pub mod schedule_service;
pub mod visitor_service;

pub use attendance_service::AttendanceService;
pub use auth_service::AuthService;
pub use client_service::ClientService;
pub use guard_service::GuardService;
pub use occurrence_service::{OccurrenceReport, OccurrenceService};
pub use payment_service::PaymentService;
pub use report_service::{DashboardStats, ReportService};
pub use schedule_service::ScheduleService;
pub use visitor_service::{VisitorCheckIn, VisitorService};
