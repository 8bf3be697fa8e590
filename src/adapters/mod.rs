//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `json_config`  | ConfigPort         | JSON file on disk        |
//! | `log_sink`     | EventSink          | `log` facade             |
//! | `sim`          | DeviceInventory    | In-memory station        |
//! |                | DevicePort         |                          |

pub mod json_config;
pub mod log_sink;
pub mod sim;
