pub mod european;
pub mod payoff;
