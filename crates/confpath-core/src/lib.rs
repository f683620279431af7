//! Config-with-Parents editing for indentation-structured configurations.
//!
//! A configuration such as a Nokia SR OS or Cisco IOS dump is parsed into a
//! flat sequence of [`CwpEntry`] values, each carrying the stripped text of
//! its ancestors. Lines are then found and edited by their full path
//! instead of their position in the file, and the sequence is written back
//! as ordinary configuration text.
//!
//! ```
//! use confpath_core::{EditSession, EditSettings, MatchOptions};
//!
//! let text = "configure\n    card 1\n        mda 1";
//! let mut session = EditSession::parse(text, EditSettings::default()).unwrap();
//! session
//!     .add_after_lines("configure,card 1,mda 1,no shutdown", "configure,card 1,mda 1", MatchOptions::literal())
//!     .unwrap();
//! assert!(session
//!     .cwp_serial_check("configure,card 1,mda 1,no shutdown", MatchOptions::literal())
//!     .unwrap());
//! ```

pub mod edit;
pub mod entry;
pub mod error;
pub mod line;
pub mod matcher;
pub mod parser;
pub mod script;
pub mod serializer;
pub mod session;
pub mod settings;
pub mod target;

pub use edit::{Edit, EditKind};
pub use entry::CwpEntry;
pub use error::{Error, Result};
pub use line::ConfigLine;
pub use matcher::{MatchOptions, SearchPattern, SerialPattern};
pub use script::{EditOperation, EditScript};
pub use session::EditSession;
pub use settings::{AmbiguityPolicy, Dialect, EditSettings, HierarchyPolicy};
