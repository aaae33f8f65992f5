//! Whole-engine tests: documented scenarios and randomized properties.

mod scenarios;
