pub mod loan;
pub mod rate;
pub mod schedule;
