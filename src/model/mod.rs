pub mod owner;
pub mod socket;

pub use owner::Owner;
pub use socket::{Protocol, SocketRecord, NO_INODE};
