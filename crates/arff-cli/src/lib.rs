//! Library side of the `arff-split` binary.
//!
//! [`pipeline::process_upload`] turns uploaded bytes into the three split
//! files, [`archive::write_archive`] packages them, and [`logging`] sets up
//! the subscriber the binary uses.

pub mod archive;
pub mod logging;
pub mod pipeline;
