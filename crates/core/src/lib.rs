//! Core payoff logic for Debtplan.
//!
//! This crate contains pure logic with ZERO file, network or terminal I/O.
//! Every debt type, validation rule and amortization calculation lives here.
//!
//! # Modules
//!
//! - `payoff` - Avalanche/snowball debt payoff simulation, plan outcomes,
//!   liability overviews and result caching

pub mod payoff;
