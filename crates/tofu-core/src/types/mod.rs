mod decision;
mod fingerprint;
mod host_key;
mod record;

pub use decision::*;
pub use fingerprint::*;
pub use host_key::*;
pub use record::*;
