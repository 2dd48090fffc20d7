//! Stripey Core - ZPL label rendering library
//!
//! This crate turns Zebra Programming Language markup into a PNG image of
//! the first label it contains, optionally rotated by a quarter turn. It
//! provides the markup parser, the rasterizer, PNG decode/encode helpers and
//! the pipeline that ties them to a command line.

pub mod config;
pub mod decode;
pub mod draw;
pub mod encode;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod transform;
pub mod zpl;

pub use config::{resolve, Command, ConfigError, Invocation, LabelConfig, USAGE};
pub use draw::{DrawError, Drawer, DrawerOptions};
pub use error::PipelineError;
pub use output::{write_output, OutputTarget};
pub use pipeline::{LabelDrawer, MarkupParser, Outcome, Pipeline};
pub use transform::{rotate_png, Rotation};
pub use zpl::{LabelInfo, ParseError, ZplParser};
