mod advice;
mod entry;
mod ledger;
mod money;
mod quote;

pub use advice::*;
pub use entry::*;
pub use ledger::*;
pub use money::*;
pub use quote::*;
