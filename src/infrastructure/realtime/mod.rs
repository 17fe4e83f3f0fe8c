pub mod change_hub;
pub mod live_collection;

pub use change_hub::ChangeHub;
pub use live_collection::LiveCollection;
