//! # CLI Module
//!
//! Command-line interface for the `routegen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! routegen generate --spec api.yaml --output ./service --root-package example.com/shop
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Route graph (required)
//! - `--output <DIR>` - Output root (default: current directory)
//! - `--config <FILE>` - Configuration file (default: `routegen.toml` next to the graph)
//! - `--style <FMT>` - File naming format (default: `gozero`)
//! - `--root-package <PKG>` - Module path for generated imports
//! - `--no-auth` - Handlers only
//! - `--home <DIR>` - Template override directory (also `ROUTEGEN_HOME`)
//! - `--dry-run` - List files without writing
//!
//! ### `inspect`
//!
//! Print derived names, error codes and policy rows without writing anything:
//!
//! ```bash
//! routegen inspect --spec api.yaml
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands, ConfigArgs};
