use roamer_core::{Direction, Migration, position_of};

use crate::error::PlannerError;

/// Positions and direction of a move between two points in the migration
/// sequence. `None` endpoints mean "no migrations applied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPlan {
    pub from_index: Option<usize>,
    pub to_index: Option<usize>,
    pub direction: Direction,
    pub distance: usize,
}

/// Build a plan between two optional migration ids, validating both against
/// the ordered migrations.
pub fn plan_operation(
    migrations: &[Migration],
    from: Option<&str>,
    to: Option<&str>,
) -> Result<OperationPlan, PlannerError> {
    let from_index = index_of(migrations, from)?;
    let to_index = index_of(migrations, to)?;

    let from_pos = signed(from_index);
    let to_pos = signed(to_index);
    let direction = if to_pos > from_pos {
        Direction::Up
    } else {
        Direction::Down
    };

    Ok(OperationPlan {
        from_index,
        to_index,
        direction,
        distance: from_pos.abs_diff(to_pos),
    })
}

fn index_of(migrations: &[Migration], id: Option<&str>) -> Result<Option<usize>, PlannerError> {
    id.map(|id| {
        position_of(migrations, id).ok_or_else(|| PlannerError::MigrationNotFound(id.to_string()))
    })
    .transpose()
}

fn signed(index: Option<usize>) -> isize {
    index.map_or(-1, |i| i as isize)
}

impl OperationPlan {
    /// Indices of the migrations to apply, in execution order.
    ///
    /// Up visits `from + 1 ..= to`; down visits `from` down to `to + 1`.
    pub fn steps(&self) -> Vec<usize> {
        let from = signed(self.from_index);
        let to = signed(self.to_index);
        match self.direction {
            Direction::Up => ((from + 1)..=to).map(|i| i as usize).collect(),
            Direction::Down => ((to + 1)..=from).rev().map(|i| i as usize).collect(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.distance == 0
    }

    /// Human readable summary, e.g. `2 up migrations`.
    pub fn distance_string(&self) -> String {
        let plural = if self.distance == 1 { "" } else { "s" };
        format!("{} {} migration{}", self.distance, self.direction, plural)
    }
}
