//! Core types for weft.
//!
//! This crate provides the identifier types and the unified error-code
//! interface shared by every weft crate.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Foundation                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  weft-types     : ComponentId, HostId, ErrorCode  ◄── HERE   │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Engine                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  weft-behaviour : schema, descriptors, per-component binding │
//! │  weft-mode      : mode registry, read-only policy            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Host                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  weft-runtime   : config, host components, editor            │
//! │  weft-cli       : `weft` binary                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use weft_types::{ComponentId, HostId};
//!
//! // Builtin components have deterministic UUIDs
//! let toolbar = ComponentId::builtin("toolbar");
//! assert_eq!(toolbar, ComponentId::builtin("toolbar"));
//!
//! // Every editor host gets its own identity
//! let a = HostId::new();
//! let b = HostId::new();
//! assert_ne!(a, b);
//! ```

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ComponentId, HostId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_id_fqn() {
        let id = ComponentId::builtin("toolbar");
        assert_eq!(id.fqn(), "builtin::toolbar");
        assert_eq!(id.to_string(), "builtin::toolbar");
    }

    #[test]
    fn host_ids_are_unique() {
        assert_ne!(HostId::new(), HostId::new());
    }
}
