pub mod cargo;
pub mod equipment;
pub mod pilot;

pub use cargo::{CargoEntry, CargoHold};
pub use equipment::EquipmentBay;
pub use pilot::Pilot;
