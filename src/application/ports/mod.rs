pub mod auth_gateway;
pub mod change_source;
pub mod record_store;
pub mod repositories;

pub use auth_gateway::{AuthGateway, AuthUser};
pub use change_source::{ChangeEvent, ChangeSource};
pub use record_store::{Filter, Order, RecordStore, StoreError};
pub use repositories::{
    AttendanceRepository, ClientRepository, GuardRepository, OccurrenceRepository,
    PaymentRepository, ScheduleRepository, VisitorRepository,
};
