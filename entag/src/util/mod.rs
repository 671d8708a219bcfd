pub(crate) mod alloc;
pub mod io;
pub(crate) mod math;
pub(crate) mod num;
pub(crate) mod text;
