pub mod error;
pub mod offset;
pub mod plan;
pub mod verify;

pub use error::PlannerError;
pub use offset::{find_migration, resolve_id_or_offset};
pub use plan::{OperationPlan, plan_operation};
pub use verify::{
    Violation, first_violation, verify_exist, verify_no_dirty, verify_order, verify_safe_to_apply,
};
