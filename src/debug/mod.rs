//! Debug tooling: free-site backtraces for double-free reports.

mod freesite;

pub(crate) use self::freesite::FreeSiteTable;
