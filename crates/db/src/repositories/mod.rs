//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod asset_repo;
pub mod fault_repo;
pub mod lot_repo;
pub mod movement_repo;
pub mod reference_repo;

pub use asset_repo::AssetRepo;
pub use fault_repo::FaultRepo;
pub use lot_repo::LotRepo;
pub use movement_repo::MovementRepo;
pub use reference_repo::ReferenceRepo;
