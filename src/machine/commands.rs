//! Built-in command prefixes understood by the appliance.
//!
//! Operation payloads are opaque to the bridge, with one exception: the power
//! commands below also drive the sticky power flag.

/// Turn the appliance on.
pub const TURN_ON: &[u8] = b"AN:01";
/// Turn the appliance off.
pub const TURN_OFF: &[u8] = b"AN:02";
/// Flush the brewing unit.
pub const FLUSH: &[u8] = b"FA:0B";
/// Read the input-channel register used for status polling.
pub const STATUS_QUERY: &[u8] = b"IC:";
