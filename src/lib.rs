//! School Records
//!
//! Replays a sequence of create/read/update/delete command files against an
//! in-memory collection of teachers, students and staff.
//!
//! ## Flow
//!
//! ```text
//! DirectorySource ──raw bytes──▶ Dispatcher ──Operation──▶ Collection
//!                                    │                          │
//!                                    └──── CommandReport ──▶ ReportSink
//! ```
//!
//! - **Records**: [`Teacher`], [`Student`] and [`Staff`], each embedding a [`Person`]
//! - **Identities**: one counter shared by every kind, starting at 1, never reused
//! - **Encodings**: JSON, XML and TOML command files, chosen by extension
//! - **Failures**: reported per command; the run always continues

pub mod codec;
pub mod collection;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod operation;
pub mod record;
pub mod replay;
pub mod report;
pub mod source;
pub mod xml;

pub use codec::{CommandEnvelope, Encoding};
pub use collection::{Collection, IdAllocator};
pub use config::ReplayConfig;
pub use dispatcher::Dispatcher;
pub use error::{RecordError, Result};
pub use operation::{Action, DeletePolicy, Operation, Outcome};
pub use record::{Entity, EntityKind, Person, Record, Staff, Student, Teacher};
pub use replay::{Replay, ReplayStats};
pub use report::{CommandReport, CommandSummary, ConsoleSink, MemorySink, ReportSink};
pub use source::{DirectorySource, MemorySource, RawCommand, SourceOrder};
