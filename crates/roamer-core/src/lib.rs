pub mod direction;
pub mod migration;

pub use direction::Direction;
pub use migration::{
    AppliedMigration, DOWN_SUFFIX, Migration, UP_SUFFIX, migration_id, position_of,
};
