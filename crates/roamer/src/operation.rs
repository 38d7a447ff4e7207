use roamer_core::{Direction, Migration};
use roamer_planner::OperationPlan;

use crate::environment::Environment;
use crate::error::EnvironmentError;

type PreMigrationHook<'e> = Box<dyn FnMut(&Migration, Direction) + 'e>;

/// A planned move from one point in the migration sequence to another.
///
/// An operation can be run once. Running it checks that the database is
/// still where the plan started, then applies each migration in turn.
pub struct Operation<'e> {
    env: &'e mut Environment,
    from: Option<Migration>,
    to: Option<Migration>,
    plan: OperationPlan,
    stamp: bool,
    pre_migration: Option<PreMigrationHook<'e>>,
    has_run: bool,
}

impl<'e> Operation<'e> {
    pub(crate) fn new(
        env: &'e mut Environment,
        from: Option<Migration>,
        to: Option<Migration>,
        plan: OperationPlan,
    ) -> Self {
        Self {
            env,
            from,
            to,
            plan,
            stamp: false,
            pre_migration: None,
            has_run: false,
        }
    }

    pub fn from(&self) -> Option<&Migration> {
        self.from.as_ref()
    }

    pub fn to(&self) -> Option<&Migration> {
        self.to.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.plan.direction
    }

    /// Number of migrations this operation will apply.
    pub fn distance(&self) -> usize {
        self.plan.distance
    }

    pub fn distance_string(&self) -> String {
        self.plan.distance_string()
    }

    pub fn plan(&self) -> &OperationPlan {
        &self.plan
    }

    /// In stamp mode the history table is updated but no scripts are executed.
    pub fn set_stamp(&mut self, stamp: bool) {
        self.stamp = stamp;
    }

    pub fn with_stamp(mut self, stamp: bool) -> Self {
        self.stamp = stamp;
        self
    }

    pub fn stamp(&self) -> bool {
        self.stamp
    }

    /// Called before each migration is applied.
    pub fn on_pre_migration(&mut self, hook: impl FnMut(&Migration, Direction) + 'e) {
        self.pre_migration = Some(Box::new(hook));
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Run the operation.
    ///
    /// The first call spends the operation whatever its outcome. A failing
    /// migration stops the run; migrations before it stay applied.
    pub fn run(&mut self) -> Result<(), EnvironmentError> {
        if self.has_run {
            return Err(EnvironmentError::AlreadyRun);
        }
        self.has_run = true;

        let last = self.env.last_applied_migration()?;
        let actual = last.as_ref().map(|a| a.id.as_str());
        let expected = self.from.as_ref().map(|m| m.id.as_str());
        if actual != expected {
            return Err(EnvironmentError::IncorrectFrom {
                expected: describe(expected),
                actual: describe(actual),
            });
        }

        let direction = self.plan.direction;
        log::debug!("running operation: {}", self.plan.distance_string());
        for index in self.plan.steps() {
            let migration = self.env.migration_at(index).clone();
            if let Some(hook) = self.pre_migration.as_mut() {
                hook(&migration, direction);
            }
            self.env
                .apply_migration(&migration, direction, self.stamp)
                .map_err(|source| EnvironmentError::OperationFailed {
                    migration_id: migration.id.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}

fn describe(id: Option<&str>) -> String {
    id.unwrap_or("[nothing]").to_string()
}
