// Logging shim: the `log` facade, or nothing at all under `quiet`.

#[cfg(feature = "quiet")]
macro_rules! debug {
  ($($x:tt)*) => {};
}
#[cfg(feature = "quiet")]
pub(crate) use debug;

#[cfg(feature = "quiet")]
macro_rules! trace {
  ($($x:tt)*) => {};
}
#[cfg(feature = "quiet")]
pub(crate) use trace;

#[cfg(not(feature = "quiet"))]
pub(crate) use ::log::{debug, trace};
