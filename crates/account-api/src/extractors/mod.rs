//! Request extractors.

mod client_addr;
mod validated_json;
mod validated_path;

pub use client_addr::ClientAddr;
pub use validated_json::ValidatedJson;
pub use validated_path::ValidatedPath;
