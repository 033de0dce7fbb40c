//! Output formats for parsed scripts
//!
//! - `treeviz` - indented tree of node names and labels
//! - `structured` - JSON and YAML dumps of the full tree, spans included
//! - `source` - canonical rad source text (the unparser)
//!
//! All of them are reachable by name through [`FormatRegistry`].

pub mod registry;
pub mod source;
pub mod structured;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use source::{to_source, SourceFormatter, ToRadSource};
pub use structured::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
