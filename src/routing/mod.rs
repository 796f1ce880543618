//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (method check, pattern match + captures)
//!     → Return: RouteMatch { route, captures } or None
//!
//! Route Table (at startup):
//!     RouteDescriptor[] in declaration order
//!     → Compile patterns
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;

pub use matcher::{PathCaptures, PathPattern, RouteMethod};
pub use router::{HandlerFn, HandlerResult, RouteDescriptor, RouteMatch, RouteTable};
