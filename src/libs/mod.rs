pub mod a3m;
pub mod batch;
pub mod convert;
pub mod error;
pub mod io;
pub mod job;
