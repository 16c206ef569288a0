//! # Kernel Initialization Module
//!
//! - `init`: the boot sequence and per-phase logging
//! - `status`: per-component initialization status
//!
//! ```ignore
//! let mut status = BOOT_STATUS.lock();
//! init_kernel(&mut platform, boot_info, &mut status)?;
//! ```

pub mod init;
pub mod status;

pub use init::{init_kernel, init_phase, Platform};
pub use status::{all_components_ready, BootStatus, Component, InitStatus, BOOT_STATUS};
