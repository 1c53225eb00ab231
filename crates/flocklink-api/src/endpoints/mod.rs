// Per-resource endpoint methods, implemented as inherent methods on
// `ApiClient` and split by resource to keep `client.rs` focused on
// transport mechanics.

mod farms;
mod programs;
mod reports;
mod rotem;
mod session;
mod workers;
