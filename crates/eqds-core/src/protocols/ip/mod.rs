//! IP-layer printer used behind EQDS data headers with next protocol 4.
//!
//! Slicing is delegated to `etherparse`; this module only renders a one-line
//! summary of the network and transport headers it finds.

pub mod printer;

pub use printer::IpPrinter;
