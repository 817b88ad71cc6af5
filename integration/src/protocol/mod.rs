/// Signed/unsigned HTTP REST request plumbing (C1/C2).
pub mod http;
