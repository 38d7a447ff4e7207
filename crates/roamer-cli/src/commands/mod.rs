pub mod create;
pub mod go;
pub mod init;
pub mod setup;
pub mod status;
pub mod upgrade;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_env;

pub use create::cmd_create;
pub use go::cmd_go;
pub use init::cmd_init;
pub use setup::cmd_setup;
pub use status::cmd_status;
pub use upgrade::cmd_upgrade;
pub use verify::cmd_verify;
