mod ghost;
mod input;
mod physics_config;
mod replay;
mod scoring;
mod session;
mod track;
pub mod vehicle;

pub use ghost::*;
pub use input::*;
pub use physics_config::*;
pub use replay::*;
pub use scoring::*;
pub use session::*;
pub use track::*;
pub use vehicle::VehicleState;
