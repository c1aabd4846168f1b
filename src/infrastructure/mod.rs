pub mod bridge;
pub mod gui_session;
pub mod session_pool;

pub use bridge::{BridgeClient, BridgeSession};
pub use gui_session::{GuiSession, SessionProvider, StatusBarMessage, TableDims};
pub use session_pool::{SessionLease, SessionPool};
